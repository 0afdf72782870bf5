//! Runtime configuration for the routine maintenance sweep.
//!
//! Values come from `REPAIR_REQUEST_*` environment variables; anything unset
//! keeps its default.

use chrono::{FixedOffset, Offset, Utc};
use minijinja::Environment;
use thiserror::Error;

/// Variable holding the minutes east of UTC used to decide "today".
pub const UTC_OFFSET_VAR: &str = "REPAIR_REQUEST_UTC_OFFSET_MINUTES";
/// Variable selecting the duplicate-ticket scope.
pub const DUPLICATE_SCOPE_VAR: &str = "REPAIR_REQUEST_DUPLICATE_SCOPE";
/// Variable overriding the ticket title template.
pub const TITLE_TEMPLATE_VAR: &str = "REPAIR_REQUEST_TITLE_TEMPLATE";
/// Variable overriding the ticket description template.
pub const DESCRIPTION_TEMPLATE_VAR: &str = "REPAIR_REQUEST_DESCRIPTION_TEMPLATE";

/// Default ticket title.
pub const DEFAULT_TITLE_TEMPLATE: &str = "Routine: {{ facility }} - {{ event }}";
/// Default ticket description.
pub const DEFAULT_DESCRIPTION_TEMPLATE: &str = concat!(
    "{% if description %}{{ description }}",
    "{% else %}Scheduled routine maintenance for {{ facility }}{% endif %}",
);

const SECONDS_PER_MINUTE: i32 = 60;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The UTC offset is not an integer or is out of range.
    #[error("invalid REPAIR_REQUEST_UTC_OFFSET_MINUTES '{0}', expected minutes within ±1439")]
    InvalidUtcOffset(String),

    /// The duplicate scope is not recognised.
    #[error("invalid REPAIR_REQUEST_DUPLICATE_SCOPE '{0}', expected 'organization' or 'task'")]
    InvalidDuplicateScope(String),

    /// A ticket template does not parse.
    #[error("invalid {name}: {reason}")]
    InvalidTemplate {
        /// Variable holding the template.
        name: &'static str,
        /// Parser message.
        reason: String,
    },
}

/// Which existing tickets suppress a new one for a due task.
///
/// Both scopes rely on the `(source_task_id, due_date)` key to reject a
/// second ticket for the same task and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateScope {
    /// Any routine maintenance ticket of the organization due the same day
    /// suppresses the new one.
    #[default]
    Organization,
    /// Only a ticket from the same task on the same day suppresses it.
    Task,
}

impl TryFrom<&str> for DuplicateScope {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "organization" | "org" => Ok(Self::Organization),
            "task" => Ok(Self::Task),
            _ => Err(ConfigError::InvalidDuplicateScope(value.to_owned())),
        }
    }
}

/// Templates rendered into generated tickets.
///
/// Both templates see `facility`, `event`, `description`, `room_number`,
/// `due_date` and `recurrence`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketTemplates {
    /// Title template.
    pub title: String,
    /// Description template.
    pub description: String,
}

impl Default for TicketTemplates {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE_TEMPLATE.to_owned(),
            description: DEFAULT_DESCRIPTION_TEMPLATE.to_owned(),
        }
    }
}

impl TicketTemplates {
    /// Checks that both templates parse.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTemplate`] naming the broken template.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_template(TITLE_TEMPLATE_VAR, &self.title)?;
        check_template(DESCRIPTION_TEMPLATE_VAR, &self.description)
    }
}

fn check_template(name: &'static str, source: &str) -> Result<(), ConfigError> {
    let environment = Environment::new();
    environment
        .template_from_str(source)
        .map(|_| ())
        .map_err(|error| ConfigError::InvalidTemplate {
            name,
            reason: error.to_string(),
        })
}

/// Settings for [`crate::maintenance::services::TicketMaterializer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Offset used to turn the sweep instant into a calendar day.
    pub utc_offset: FixedOffset,
    /// Scope of the pre-insert duplicate check.
    pub duplicate_scope: DuplicateScope,
    /// Ticket text templates.
    pub templates: TicketTemplates,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
            duplicate_scope: DuplicateScope::default(),
            templates: TicketTemplates::default(),
        }
    }
}

impl SweepConfig {
    /// Sets the offset used to decide "today".
    #[must_use]
    pub const fn with_utc_offset(mut self, utc_offset: FixedOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    /// Sets the duplicate-check scope.
    #[must_use]
    pub const fn with_duplicate_scope(mut self, duplicate_scope: DuplicateScope) -> Self {
        self.duplicate_scope = duplicate_scope;
        self
    }

    /// Sets the ticket templates.
    #[must_use]
    pub fn with_templates(mut self, templates: TicketTemplates) -> Self {
        self.templates = templates;
        self
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(UTC_OFFSET_VAR) {
            config.utc_offset = parse_utc_offset(&raw)?;
        }
        if let Some(raw) = lookup(DUPLICATE_SCOPE_VAR) {
            config.duplicate_scope = DuplicateScope::try_from(raw.as_str())?;
        }
        if let Some(title) = lookup(TITLE_TEMPLATE_VAR) {
            config.templates.title = title;
        }
        if let Some(description) = lookup(DESCRIPTION_TEMPLATE_VAR) {
            config.templates.description = description;
        }

        config.templates.validate()?;
        Ok(config)
    }
}

fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .and_then(|minutes| minutes.checked_mul(SECONDS_PER_MINUTE))
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| ConfigError::InvalidUtcOffset(raw.to_owned()))
}
