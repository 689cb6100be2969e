//! Directory submission forms and their validation rules.
//!
//! Forms arrive url-encoded from the browser. They are also stashed in the
//! session as JSON when a submission fails validation, so the same types must
//! deserialize from both encodings.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::genres::is_storable;
use crate::schedule::parse_start_time;
use crate::types::{DbId, Timestamp};

const REQUIRED: &str = "This field is required.";

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9][0-9 ()\-.]{6,}[0-9]$").expect("phone pattern compiles")
});

// ---------------------------------------------------------------------------
// Field decoders
// ---------------------------------------------------------------------------

/// Blank optional inputs are treated as absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// HTML checkboxes post `y`/`on` when ticked; the session copy stores a bool.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Flag(flag) => flag,
        Raw::Text(text) => !matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "" | "n" | "no" | "false" | "off" | "0"
        ),
    })
}

fn valid_id(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<DbId>() {
        Ok(id) if id > 0 => Ok(()),
        _ => Err(ValidationError::new("id").with_message("Not a valid id.".into())),
    }
}

fn valid_genres(genres: &[String]) -> Result<(), ValidationError> {
    if genres.iter().all(|g| is_storable(g)) {
        Ok(())
    } else {
        Err(ValidationError::new("genres").with_message("Genres may not contain commas.".into()))
    }
}

fn valid_start_time(value: &str) -> Result<(), ValidationError> {
    parse_start_time(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("datetime").with_message("Not a valid datetime value.".into()))
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VenueForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "This field is required."))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "This field is required."))]
    pub city: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "This field is required."))]
    pub state: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "This field is required."))]
    pub address: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number."))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "This field is required."),
        custom(function = "valid_genres")
    )]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Invalid URL."), length(max = 500))]
    pub image_link: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Invalid URL."), length(max = 120))]
    pub facebook_link: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Invalid URL."), length(max = 120))]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "checkbox")]
    pub seeking_talent: bool,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 120))]
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ArtistForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "This field is required."))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "This field is required."))]
    pub city: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "This field is required."))]
    pub state: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number."))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "This field is required."),
        custom(function = "valid_genres")
    )]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Invalid URL."), length(max = 500))]
    pub image_link: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Invalid URL."), length(max = 120))]
    pub facebook_link: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Invalid URL."), length(max = 120))]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "checkbox")]
    pub seeking_venue: bool,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 120))]
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ShowForm {
    #[serde(default)]
    #[validate(custom(function = "valid_id"))]
    pub artist_id: String,
    #[serde(default)]
    #[validate(custom(function = "valid_id"))]
    pub venue_id: String,
    #[serde(default)]
    #[validate(custom(function = "valid_start_time"))]
    pub start_time: String,
}

/// A show form that passed validation, with its fields decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowSubmission {
    pub artist_id: DbId,
    pub venue_id: DbId,
    pub start_time: Timestamp,
}

impl ShowForm {
    /// Validate and decode in one step.
    pub fn submission(&self) -> Result<ShowSubmission, ValidationErrors> {
        self.validate()?;
        match (
            self.artist_id.trim().parse(),
            self.venue_id.trim().parse(),
            parse_start_time(&self.start_time),
        ) {
            (Ok(artist_id), Ok(venue_id), Some(start_time)) => Ok(ShowSubmission {
                artist_id,
                venue_id,
                start_time,
            }),
            // validate() accepted every field, so decoding cannot fail here.
            _ => Err(ValidationErrors::new()),
        }
    }
}

// ---------------------------------------------------------------------------
// Error presentation
// ---------------------------------------------------------------------------

/// `seeking_description` -> `Seeking_Description`, matching the label style
/// of the flash messages.
fn field_title(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = true;
    for c in field.chars() {
        if c.is_alphabetic() {
            if upper_next {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            upper_next = false;
        } else {
            out.push(c);
            upper_next = true;
        }
    }
    out
}

fn message_of(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None if error.code == "length" => REQUIRED.to_string(),
        None => format!("Invalid value ({}).", error.code),
    }
}

/// Per-field error messages, fields in name order.
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let field: &str = field.as_ref();
            (field.to_string(), errs.iter().map(message_of).collect())
        })
        .collect()
}

/// Per-field errors of `form`, empty when it validates.
pub fn form_errors<F: Validate>(form: &F) -> BTreeMap<String, Vec<String>> {
    form.validate()
        .err()
        .map(|e| field_errors(&e))
        .unwrap_or_default()
}

/// One `"<Field>: <first message>"` flash line per failing field.
pub fn flash_lines(errors: &ValidationErrors) -> Vec<String> {
    field_errors(errors)
        .into_iter()
        .filter_map(|(field, messages)| {
            messages
                .into_iter()
                .next()
                .map(|first| format!("{}: {first}", field_title(&field)))
        })
        .collect()
}
