//! Terminal session: one local participant in their own room.
//!
//! Routes lobby navigation and activity input, and closes activities that ask
//! to be closed. Knows nothing about terminals or keys.

use crate::activities::{ActivityInput, ActivityKind, ActivityOutcome};
use crate::config::Config;
use crate::feedback::Feedback;
use crate::room::{Participant, Room};
use rand::Rng;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppInput {
    Activity(ActivityInput),
    CycleTheme,
    /// Start typing a lobby chat message
    OpenChat,
    ChatChar(char),
    ChatBackspace,
    /// Send the draft, or close the composer if it is blank
    ChatSend,
    ChatCancel,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub room: Room,
    /// The local participant
    pub me: Uuid,
    /// Index into `ActivityKind::MENU`
    pub lobby_cursor: usize,
    /// One-line message for the lobby, e.g. a refused activity
    pub notice: Option<String>,
    /// Chat message being typed, `None` when the composer is closed
    pub chat_draft: Option<String>,
    pub running: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let me = Participant::new(config.display_name.clone(), config.avatar.clone());
        let me_id = me.id;
        let mut room = Room::new(me, config.theme);
        room.bot_defaults = config.bot_config();
        Self {
            room,
            me: me_id,
            lobby_cursor: 0,
            notice: None,
            chat_draft: None,
            running: true,
        }
    }

    pub fn selected_kind(&self) -> ActivityKind {
        ActivityKind::MENU[self.lobby_cursor % ActivityKind::MENU.len()]
    }

    pub fn is_composing(&self) -> bool {
        self.chat_draft.is_some()
    }

    pub fn handle(&mut self, input: AppInput, feedback: &mut dyn Feedback) {
        match input {
            AppInput::Quit => self.running = false,
            AppInput::OpenChat => {
                if self.room.current_kind() == ActivityKind::Lobby {
                    self.chat_draft.get_or_insert_with(String::new);
                }
            }
            AppInput::ChatChar(c) => {
                if let Some(draft) = self.chat_draft.as_mut() {
                    draft.push(c);
                }
            }
            AppInput::ChatBackspace => {
                if let Some(draft) = self.chat_draft.as_mut() {
                    draft.pop();
                }
            }
            AppInput::ChatSend => self.send_chat(),
            AppInput::ChatCancel => self.chat_draft = None,
            AppInput::CycleTheme => {
                if self.room.current_kind() == ActivityKind::Lobby {
                    self.room.theme = self.room.theme.next();
                }
            }
            AppInput::Activity(input) => {
                let outcome = self
                    .room
                    .activity_mut()
                    .map(|activity| activity.process_input(input, feedback));
                match outcome {
                    Some(ActivityOutcome::Close) => self.room.close_activity(),
                    Some(ActivityOutcome::Continue) => {}
                    None => self.handle_lobby(input),
                }
            }
        }
    }

    fn handle_lobby(&mut self, input: ActivityInput) {
        let len = ActivityKind::MENU.len();
        match input {
            ActivityInput::Up => self.lobby_cursor = (self.lobby_cursor + len - 1) % len,
            ActivityInput::Down => self.lobby_cursor = (self.lobby_cursor + 1) % len,
            ActivityInput::Primary => {
                self.notice = self
                    .room
                    .open_activity(self.selected_kind(), self.me)
                    .err()
                    .map(|e| e.to_string());
            }
            ActivityInput::Cancel => self.running = false,
            _ => {}
        }
    }

    fn send_chat(&mut self) {
        let Some(draft) = self.chat_draft.take() else {
            return;
        };
        if draft.trim().is_empty() {
            return;
        }
        if let Err(e) = self.room.send_message(self.me, &draft) {
            self.notice = Some(e.to_string());
        }
    }

    /// Advance the mounted activity. Returns true if it changed on its own.
    pub fn tick<R: Rng>(&mut self, dt: Duration, rng: &mut R, feedback: &mut dyn Feedback) -> bool {
        match self.room.activity_mut() {
            Some(activity) => activity.tick(dt, rng, feedback),
            None => false,
        }
    }
}
