//! Badge shaping
//!
//! Turns achievement records into display badges: icons become image
//! resources and dates are rewritten for display.

use serde::Serialize;

use crate::api::AchievementRecord;

/// Date shown for badges the team has not attained
pub const NOT_ATTAINED_DATE: &str = "-";

const IMAGE_PREFIX: &str = "data:image/jpg;base64,";

/// Displayable image built from a base64 payload sent by the API
///
/// Only constructible from payloads made of base64 characters, so a
/// renderer can place it in an `src` attribute as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageResource(String);

impl ImageResource {
    /// Wrap a base64 payload as a `data:` URL
    ///
    /// Line breaks and other ASCII whitespace are dropped and the URL-safe
    /// alphabet (`-`, `_`) is rewritten to the standard one.
    pub fn from_base64(payload: &str) -> Option<Self> {
        let mut normalized = String::with_capacity(payload.len());
        for c in payload.chars().filter(|c| !c.is_ascii_whitespace()) {
            match c {
                'A'..='Z' | 'a'..='z' | '0'..='9' | '+' | '/' | '=' => normalized.push(c),
                '-' => normalized.push('+'),
                '_' => normalized.push('/'),
                _ => {
                    tracing::warn!("Ignoring image payload with non-base64 characters");
                    return None;
                }
            }
        }
        if normalized.is_empty() {
            return None;
        }

        Some(Self(format!("{}{}", IMAGE_PREFIX, normalized)))
    }

    /// Same as [`from_base64`](Self::from_base64) for optional payloads
    pub fn from_payload(payload: Option<&str>) -> Option<Self> {
        payload.and_then(Self::from_base64)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Size of the decoded image in bytes
    pub fn decoded_len(&self) -> usize {
        let payload = &self.0[IMAGE_PREFIX.len()..];
        let data_len = payload.trim_end_matches('=').len();
        data_len * 3 / 4
    }
}

/// Badge as displayed in lists and dialogs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub name: String,
    pub icon: Option<ImageResource>,
    pub date: String,
    pub units: i64,
}

impl Badge {
    /// Badge the team holds; the date `DD-MM-YYYY` is shown as `YYYY/MM/DD`
    pub fn attained(record: AchievementRecord) -> Self {
        let date = match record.date.as_deref() {
            Some(date) => reverse_date(date),
            None => {
                tracing::warn!(badge = %record.name, "Attained badge has no date");
                String::new()
            }
        };

        Self {
            icon: ImageResource::from_payload(record.icon.as_deref()),
            name: record.name,
            date,
            units: record.units,
        }
    }

    /// Badge the team does not hold yet; any server date is ignored
    pub fn not_attained(record: AchievementRecord) -> Self {
        Self {
            icon: ImageResource::from_payload(record.icon.as_deref()),
            name: record.name,
            date: NOT_ATTAINED_DATE.to_string(),
            units: record.units,
        }
    }
}

/// Reverse the `-`-separated segments of a date and join them with `/`
///
/// `"05-03-2024"` becomes `"2024/03/05"`. Input without `-` comes back
/// unchanged.
pub fn reverse_date(date: &str) -> String {
    date.split('-').rev().collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, date: Option<&str>) -> AchievementRecord {
        AchievementRecord {
            name: name.to_string(),
            icon: Some("aWNvbg==".to_string()),
            date: date.map(str::to_string),
            units: 2,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_reverse_date() {
        assert_eq!(reverse_date("05-03-2024"), "2024/03/05");
        assert_eq!(reverse_date("31-12-1999"), "1999/12/31");
        assert_eq!(reverse_date("2024"), "2024");
        assert_eq!(reverse_date(""), "");
    }

    #[test]
    fn test_attained_badge() {
        let badge = Badge::attained(record("Bug hunter", Some("05-03-2024")));
        assert_eq!(badge.name, "Bug hunter");
        assert_eq!(badge.date, "2024/03/05");
        assert_eq!(badge.units, 2);
        assert_eq!(
            badge.icon.unwrap().as_str(),
            "data:image/jpg;base64,aWNvbg=="
        );
    }

    #[test]
    fn test_attained_badge_without_date() {
        let badge = Badge::attained(record("Bug hunter", None));
        assert_eq!(badge.date, "");
    }

    #[test]
    fn test_not_attained_badge_ignores_date() {
        let badge = Badge::not_attained(record("Reviewer", Some("05-03-2024")));
        assert_eq!(badge.date, NOT_ATTAINED_DATE);

        let badge = Badge::not_attained(record("Reviewer", None));
        assert_eq!(badge.date, "-");
    }

    #[test]
    fn test_image_resource_rejects_markup() {
        assert!(ImageResource::from_base64("\" onerror=\"alert(1)").is_none());
        assert!(ImageResource::from_base64("").is_none());
        assert!(ImageResource::from_payload(None).is_none());
    }

    #[test]
    fn test_image_resource_accepts_wrapped_and_url_safe_payloads() {
        let wrapped = ImageResource::from_base64("aWNv\r\nbg==\n").unwrap();
        assert_eq!(wrapped.as_str(), "data:image/jpg;base64,aWNvbg==");

        let url_safe = ImageResource::from_base64("-_8A").unwrap();
        assert_eq!(url_safe.as_str(), "data:image/jpg;base64,+/8A");
        assert_eq!(url_safe.decoded_len(), 3);

        assert!(ImageResource::from_base64(" \n ").is_none());
    }

    #[test]
    fn test_decoded_len() {
        let image = ImageResource::from_base64("aWNvbg==").unwrap();
        assert_eq!(image.decoded_len(), 4);

        let image = ImageResource::from_base64("YWJj").unwrap();
        assert_eq!(image.decoded_len(), 3);

        let unpadded = ImageResource::from_base64("aWNvbg").unwrap();
        assert_eq!(unpadded.decoded_len(), 4);
    }
}
