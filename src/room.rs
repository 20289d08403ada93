//! The duo room: participants, the waiting room, chat, theme and the mounted
//! activity.

use crate::activities::chess::BotConfig;
use crate::activities::{Activity, ActivityKind, HostContext, Seat};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// Cosmetic room theme. Only colors depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomTheme {
    Romantic,
    Business,
    #[default]
    Friendly,
}

impl RoomTheme {
    pub const ALL: [RoomTheme; 3] = [RoomTheme::Romantic, RoomTheme::Business, RoomTheme::Friendly];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Romantic => "Romantic",
            Self::Business => "Business",
            Self::Friendly => "Friendly",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Romantic => Self::Business,
            Self::Business => Self::Friendly,
            Self::Friendly => Self::Romantic,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RoomError {
    #[error("only the room owner can start {}", .0.name())]
    NotAllowed(ActivityKind),

    #[error("only the room owner can {0}")]
    OwnerOnly(&'static str),

    #[error("no participant with id {0}")]
    UnknownParticipant(Uuid),

    #[error("the room owner cannot be removed")]
    OwnerCannotLeave,

    #[error("message is empty")]
    EmptyMessage,
}

/// A chat line, stamped with the sender as they were when it was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub sender_avatar: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            avatar: avatar.into(),
            joined_at: Utc::now(),
        }
    }

    fn seat(&self) -> Seat {
        Seat::new(self.name.clone(), self.avatar.clone())
    }
}

#[derive(Debug)]
pub struct Room {
    pub id: Uuid,
    pub theme: RoomTheme,
    pub owner: Uuid,
    pub participants: Vec<Participant>,
    /// People asking to join, in arrival order
    pub waiting_room: Vec<Participant>,
    pub messages: Vec<Message>,
    /// Bot settings a new chess board starts with
    pub bot_defaults: BotConfig,
    activity: Option<Activity>,
}

impl Room {
    /// Open a room owned by `owner`, who is its first participant.
    pub fn new(owner: Participant, theme: RoomTheme) -> Self {
        let room = Self {
            id: Uuid::new_v4(),
            theme,
            owner: owner.id,
            participants: vec![owner],
            waiting_room: Vec::new(),
            messages: Vec::new(),
            bot_defaults: BotConfig::default(),
            activity: None,
        };
        info!(room = %room.id, theme = room.theme.name(), "room opened");
        room
    }

    pub fn join(&mut self, participant: Participant) {
        debug!(room = %self.id, name = %participant.name, "participant joined");
        self.participants.push(participant);
    }

    /// Queue someone for the owner's approval.
    pub fn request_join(&mut self, participant: Participant) {
        debug!(room = %self.id, name = %participant.name, "join requested");
        self.waiting_room.push(participant);
    }

    /// Move a waiting user into the room.
    pub fn approve(&mut self, actor: Uuid, id: Uuid) -> Result<(), RoomError> {
        self.require_owner(actor, "approve guests")?;
        let index = self
            .waiting_room
            .iter()
            .position(|p| p.id == id)
            .ok_or(RoomError::UnknownParticipant(id))?;
        let participant = self.waiting_room.remove(index);
        info!(room = %self.id, name = %participant.name, "guest approved");
        self.participants.push(participant);
        Ok(())
    }

    /// Turn a waiting user away.
    pub fn deny(&mut self, actor: Uuid, id: Uuid) -> Result<(), RoomError> {
        self.require_owner(actor, "deny guests")?;
        let index = self
            .waiting_room
            .iter()
            .position(|p| p.id == id)
            .ok_or(RoomError::UnknownParticipant(id))?;
        let participant = self.waiting_room.remove(index);
        debug!(room = %self.id, name = %participant.name, "guest denied");
        Ok(())
    }

    /// Remove a participant. The owner stays.
    pub fn kick(&mut self, actor: Uuid, id: Uuid) -> Result<(), RoomError> {
        self.require_owner(actor, "remove participants")?;
        if self.is_owner(id) {
            return Err(RoomError::OwnerCannotLeave);
        }
        let index = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or(RoomError::UnknownParticipant(id))?;
        let participant = self.participants.remove(index);
        info!(room = %self.id, name = %participant.name, "participant removed");
        Ok(())
    }

    /// Post a chat message. Blank messages are refused; waiting users cannot
    /// chat.
    pub fn send_message(&mut self, sender: Uuid, content: &str) -> Result<&Message, RoomError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(RoomError::EmptyMessage);
        }
        let author = self
            .participant(sender)
            .ok_or(RoomError::UnknownParticipant(sender))?;
        let message = Message {
            id: Uuid::new_v4(),
            sender_id: author.id,
            sender_name: author.name.clone(),
            sender_avatar: author.avatar.clone(),
            content: content.to_string(),
            sent_at: Utc::now(),
        };
        debug!(room = %self.id, sender = %message.sender_name, "message sent");
        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }

    fn require_owner(&self, actor: Uuid, action: &'static str) -> Result<(), RoomError> {
        if self.is_owner(actor) {
            Ok(())
        } else {
            Err(RoomError::OwnerOnly(action))
        }
    }

    pub fn participant(&self, id: Uuid) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn is_owner(&self, id: Uuid) -> bool {
        self.owner == id
    }

    /// What an activity opened by `actor` is told about the room. The first
    /// two participants take the White and Black seats.
    pub fn host_context(&self, actor: Uuid) -> HostContext {
        HostContext {
            can_start_games: self.is_owner(actor),
            theme: self.theme,
            white: self.participants.first().map(Participant::seat),
            black: self.participants.get(1).map(Participant::seat),
        }
    }

    /// Mount `kind`, replacing whatever was open. Games are owner-only.
    pub fn open_activity(&mut self, kind: ActivityKind, actor: Uuid) -> Result<(), RoomError> {
        if self.participant(actor).is_none() {
            return Err(RoomError::UnknownParticipant(actor));
        }
        if kind.is_game() && !self.is_owner(actor) {
            return Err(RoomError::NotAllowed(kind));
        }
        let host = self.host_context(actor);
        self.activity = Activity::mount(kind, host, self.bot_defaults);
        info!(room = %self.id, activity = kind.name(), "activity opened");
        Ok(())
    }

    /// Back to the lobby. Dropping the activity drops any pending bot move.
    pub fn close_activity(&mut self) {
        if let Some(activity) = self.activity.take() {
            info!(room = %self.id, activity = activity.kind().name(), "activity closed");
        }
    }

    pub fn current_kind(&self) -> ActivityKind {
        self.activity
            .as_ref()
            .map_or(ActivityKind::Lobby, Activity::kind)
    }

    pub fn activity(&self) -> Option<&Activity> {
        self.activity.as_ref()
    }

    pub fn activity_mut(&mut self) -> Option<&mut Activity> {
        self.activity.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_with_guest() -> (Room, Uuid, Uuid) {
        let owner = Participant::new("Ana", "🦊");
        let guest = Participant::new("Ben", "🐻");
        let (owner_id, guest_id) = (owner.id, guest.id);
        let mut room = Room::new(owner, RoomTheme::Romantic);
        room.join(guest);
        (room, owner_id, guest_id)
    }

    #[test]
    fn test_owner_opens_game() {
        let (mut room, owner, _) = room_with_guest();
        assert_eq!(room.current_kind(), ActivityKind::Lobby);
        room.open_activity(ActivityKind::Chess, owner).unwrap();
        assert_eq!(room.current_kind(), ActivityKind::Chess);
    }

    #[test]
    fn test_guest_cannot_open_game() {
        let (mut room, _, guest) = room_with_guest();
        assert_eq!(
            room.open_activity(ActivityKind::RockPaperScissors, guest),
            Err(RoomError::NotAllowed(ActivityKind::RockPaperScissors))
        );
        assert_eq!(room.current_kind(), ActivityKind::Lobby);
        room.open_activity(ActivityKind::Radio, guest).unwrap();
        assert_eq!(room.current_kind(), ActivityKind::Radio);
    }

    #[test]
    fn test_unknown_participant() {
        let (mut room, _, _) = room_with_guest();
        let stranger = Uuid::new_v4();
        assert_eq!(
            room.open_activity(ActivityKind::Radio, stranger),
            Err(RoomError::UnknownParticipant(stranger))
        );
    }

    #[test]
    fn test_host_context_seats() {
        let (room, owner, guest) = room_with_guest();
        let ctx = room.host_context(owner);
        assert!(ctx.can_start_games);
        assert_eq!(ctx.theme, RoomTheme::Romantic);
        assert_eq!(ctx.white, Some(Seat::new("Ana", "🦊")));
        assert_eq!(ctx.black, Some(Seat::new("Ben", "🐻")));
        assert!(!room.host_context(guest).can_start_games);
    }

    #[test]
    fn test_close_returns_to_lobby() {
        let (mut room, owner, _) = room_with_guest();
        room.open_activity(ActivityKind::Chess, owner).unwrap();
        room.close_activity();
        assert_eq!(room.current_kind(), ActivityKind::Lobby);
        assert!(room.activity().is_none());
    }

    #[test]
    fn test_waiting_room_approval() {
        let (mut room, owner, guest) = room_with_guest();
        let visitor = Participant::new("Cleo", "🐱");
        let visitor_id = visitor.id;
        room.request_join(visitor);
        assert!(room.participant(visitor_id).is_none());

        assert_eq!(
            room.approve(guest, visitor_id),
            Err(RoomError::OwnerOnly("approve guests"))
        );
        room.approve(owner, visitor_id).unwrap();
        assert!(room.waiting_room.is_empty());
        assert_eq!(room.participants.last().map(|p| p.id), Some(visitor_id));
        assert_eq!(
            room.approve(owner, visitor_id),
            Err(RoomError::UnknownParticipant(visitor_id))
        );
    }

    #[test]
    fn test_deny_drops_request() {
        let (mut room, owner, _) = room_with_guest();
        let visitor = Participant::new("Cleo", "🐱");
        let visitor_id = visitor.id;
        room.request_join(visitor);
        room.deny(owner, visitor_id).unwrap();
        assert!(room.waiting_room.is_empty());
        assert!(room.participant(visitor_id).is_none());
    }

    #[test]
    fn test_kick() {
        let (mut room, owner, guest) = room_with_guest();
        assert_eq!(
            room.kick(guest, owner),
            Err(RoomError::OwnerOnly("remove participants"))
        );
        assert_eq!(room.kick(owner, owner), Err(RoomError::OwnerCannotLeave));
        room.kick(owner, guest).unwrap();
        assert!(room.participant(guest).is_none());
        assert_eq!(room.participants.len(), 1);
        assert_eq!(room.kick(owner, guest), Err(RoomError::UnknownParticipant(guest)));
    }

    #[test]
    fn test_send_message_stamps_sender() {
        let (mut room, _, guest) = room_with_guest();
        let message = room.send_message(guest, "  good game!  ").unwrap().clone();
        assert_eq!(message.sender_id, guest);
        assert_eq!(message.sender_name, "Ben");
        assert_eq!(message.sender_avatar, "🐻");
        assert_eq!(message.content, "good game!");
        assert_eq!(room.messages, vec![message]);
    }

    #[test]
    fn test_blank_and_stranger_messages_refused() {
        let (mut room, owner, _) = room_with_guest();
        assert_eq!(room.send_message(owner, "   \n"), Err(RoomError::EmptyMessage));
        let visitor = Participant::new("Cleo", "🐱");
        let visitor_id = visitor.id;
        room.request_join(visitor);
        assert_eq!(
            room.send_message(visitor_id, "hi"),
            Err(RoomError::UnknownParticipant(visitor_id))
        );
        assert!(room.messages.is_empty());
    }

    #[test]
    fn test_theme_serde_and_cycle() {
        assert_eq!(
            serde_json::to_string(&RoomTheme::Business).unwrap(),
            "\"business\""
        );
        assert_eq!(RoomTheme::Friendly.next(), RoomTheme::Romantic);
    }
}
