//! Announcement bot service - the two-stage browsing FSM.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::conversation::StateOrdinal;
use crate::domain::foundation::{BotError, CategoryId, Timestamp};
use crate::domain::messaging::{replies, Message, QuickReply};
use crate::ports::{AnnouncementQuery, AnnouncementRepository, CategoryRepository};

use super::service::{BotService, TurnRequest, TurnResult};

/// Announcements served per carousel page.
pub const ANNOUNCEMENT_PAGE_SIZE: u32 = 10;

/// The only ordinal this service ever persists: "browsing". Both the
/// initial category listing and paginated browsing live here, told apart
/// by the presence of a cursor.
const BROWSING: u32 = 1;

/// Typed pagination cursor, stored in the opaque cache slot.
///
/// Never holds a live `Category`: the category travels as a serializable
/// reference and is re-resolved against the repository when needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementCursor {
    pub category_id: CategoryId,
    /// Kept for the lead message so paging does not re-query the category.
    pub category_name: String,
    pub next_page: u32,
}

impl AnnouncementCursor {
    /// Decodes a cursor from the store's opaque representation.
    ///
    /// A cache this service wrote but can no longer decode means the
    /// store is corrupt, so failure is an internal error.
    pub fn decode(value: &Value) -> Result<Self, BotError> {
        serde_json::from_value(value.clone()).map_err(|err| {
            BotError::inconsistency(format!("undecodable announcement cursor: {}", err))
        })
    }

    /// Encodes the cursor into the store's opaque representation.
    pub fn encode(&self) -> Result<Value, BotError> {
        serde_json::to_value(self).map_err(|err| {
            BotError::inconsistency(format!("unencodable announcement cursor: {}", err))
        })
    }
}

/// Bot service for browsing announcements by category.
///
/// Stage A lists categories; Stage B resolves a category name and pages
/// through its announcements, reacting to three fixed commands.
pub struct AnnouncementBotService {
    announcements: Arc<dyn AnnouncementRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl AnnouncementBotService {
    pub fn new(
        announcements: Arc<dyn AnnouncementRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            announcements,
            categories,
        }
    }

    /// Stage A: list all categories.
    async fn list_categories(&self) -> Result<TurnResult, BotError> {
        let categories = self.categories.find_all().await?;

        if categories.is_empty() {
            return Ok(TurnResult::Complete {
                messages: vec![Message::text(replies::NO_CATEGORY)],
            });
        }

        let mut text = String::from(replies::INPUT_CATEGORY);
        text.push('\n');
        for (i, category) in categories.iter().enumerate() {
            if i % 2 == 1 {
                text.push('\t');
            }
            text.push_str(category.name());
            if i % 2 == 1 {
                text.push('\n');
            }
        }

        let suggestions = categories
            .iter()
            .map(|category| QuickReply::new(category.name(), category.name()))
            .collect();

        Ok(TurnResult::InProgress {
            ordinal: StateOrdinal::new(BROWSING)?,
            messages: vec![Message::text(text).with_quick_replies(suggestions)],
            cache: None,
        })
    }

    /// Stage B without a cursor: the text is a category-name lookup.
    async fn select_category(&self, turn: &TurnRequest) -> Result<TurnResult, BotError> {
        let name = turn.text.trim();

        let Some(category) = self.categories.find_by_name(name).await? else {
            return Ok(TurnResult::UserError {
                messages: vec![Message::text(replies::UNKNOWN_CATEGORY)],
            });
        };

        self.serve_page(category.id(), category.name(), 1, turn.timestamp)
            .await
    }

    /// Stage B with a cursor: match the three fixed commands.
    async fn handle_command(
        &self,
        turn: &TurnRequest,
        cursor: AnnouncementCursor,
    ) -> Result<TurnResult, BotError> {
        let command = turn.text.trim();

        if command.eq_ignore_ascii_case(replies::END_REQUEST_COMMAND) {
            return Ok(TurnResult::Complete {
                messages: vec![Message::text(replies::END_REQUEST_REPLY)],
            });
        }

        if command.eq_ignore_ascii_case(replies::RECHOOSE_CATEGORY_COMMAND) {
            return self.list_categories().await;
        }

        if command.eq_ignore_ascii_case(replies::NEXT_PAGE_COMMAND) {
            return self
                .serve_page(
                    cursor.category_id,
                    &cursor.category_name,
                    cursor.next_page,
                    turn.timestamp,
                )
                .await;
        }

        // Noise while browsing: re-prompt without losing the position.
        Ok(TurnResult::InProgress {
            ordinal: StateOrdinal::new(BROWSING)?,
            messages: vec![
                Message::text(replies::UNIDENTIFIABLE),
                replies::PROMPT_MESSAGE.clone(),
            ],
            cache: Some(cursor.encode()?),
        })
    }

    /// Fetches and renders one page of a category's announcements.
    async fn serve_page(
        &self,
        category_id: CategoryId,
        category_name: &str,
        page: u32,
        at: Timestamp,
    ) -> Result<TurnResult, BotError> {
        let announcements = self
            .announcements
            .find_by_category(
                &category_id,
                AnnouncementQuery::page(page, ANNOUNCEMENT_PAGE_SIZE, at),
            )
            .await?;

        if announcements.is_empty() {
            return Ok(TurnResult::InProgress {
                ordinal: StateOrdinal::new(BROWSING)?,
                messages: vec![
                    Message::text(replies::NO_ANNOUNCEMENT),
                    replies::PROMPT_MESSAGE.clone(),
                ],
                cache: None,
            });
        }

        let lead = Message::text(format!(
            "{} {}.",
            replies::ANNOUNCEMENT_SERVED,
            category_name
        ));
        let carousel = Message::carousel(
            announcements
                .iter()
                .map(|a| (Some(a.title().to_string()), a.content().to_string()))
                .collect(),
        )?;

        let cursor = AnnouncementCursor {
            category_id,
            category_name: category_name.to_string(),
            next_page: page + 1,
        };

        Ok(TurnResult::InProgress {
            ordinal: StateOrdinal::new(BROWSING)?,
            messages: vec![lead, carousel, replies::PROMPT_MESSAGE.clone()],
            cache: Some(cursor.encode()?),
        })
    }
}

#[async_trait]
impl BotService for AnnouncementBotService {
    fn identifier(&self) -> &'static str {
        "pengumuman"
    }

    async fn handle(&self, turn: TurnRequest) -> Result<TurnResult, BotError> {
        match turn.ordinal {
            0 => self.list_categories().await,
            BROWSING => match &turn.cache {
                None => self.select_category(&turn).await,
                Some(value) => {
                    let cursor = AnnouncementCursor::decode(value)?;
                    self.handle_command(&turn, cursor).await
                }
            },
            other => Err(BotError::inconsistency(format!(
                "announcement service cannot reach ordinal {}",
                other
            ))),
        }
    }
}
