//! Timestamp formats used by resource payloads
//!
//! API v2010 sends RFC 2822 dates (`Wed, 18 Aug 2010 20:01:40 +0000`), the
//! newer APIs send ISO 8601. Missing, null, empty and unparseable values map
//! to `None`; an unparseable one is logged and never fails the record.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer};
use tracing::warn;

pub(crate) fn rfc2822<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_with(deserializer, DateTime::<FixedOffset>::parse_from_rfc2822)
}

pub(crate) fn iso8601<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_with(deserializer, DateTime::<FixedOffset>::parse_from_rfc3339)
}

fn parse_with<'de, D>(
    deserializer: D,
    parse: fn(&str) -> chrono::ParseResult<DateTime<FixedOffset>>,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)?.filter(|raw| !raw.is_empty())
    else {
        return Ok(None);
    };

    match parse(&raw) {
        Ok(date) => Ok(Some(date.with_timezone(&Utc))),
        Err(e) => {
            warn!("Ignoring invalid date \"{}\": {}", raw, e);
            Ok(None)
        }
    }
}
