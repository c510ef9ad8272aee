mod config;

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use serde_json::{Value, json};
use streamfeed::Activity;
use streamfeed::activity::{format_time, recipient_string};
use streamfeed::listing::{ActivityGroup, Followers, GroupedActivities};
use tracing::{Level, info};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Encode,
    Decode,
    Groups,
    Followers,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "encode" => Ok(Mode::Encode),
            "decode" => Ok(Mode::Decode),
            "groups" => Ok(Mode::Groups),
            "followers" => Ok(Mode::Followers),
            other => bail!("unknown mode {other:?}; expected encode, decode, groups or followers"),
        }
    }
}

fn main() -> Result<()> {
    let flags = xflags::parse_or_exit! {
        /// One of encode, decode, groups or followers
        required -m,--mode MODE: String
        /// JSON document to read
        required -i,--input INPUT: PathBuf
        /// TOML config file
        optional -c,--config CONFIG: PathBuf
    };
    let config = match &flags.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let level = Level::from_str(&config.log.level)
        .map_err(|_| anyhow!("invalid log level {:?}", config.log.level))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mode: Mode = flags.mode.parse()?;
    let input = fs::read(&flags.input)
        .with_context(|| format!("unable to read {}", flags.input.display()))?;
    let output = run(mode, &config, &input)?;

    let text = if config.output.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{text}");
    Ok(())
}

fn run(mode: Mode, config: &Config, input: &[u8]) -> Result<Value> {
    match mode {
        Mode::Encode => {
            let activity = Activity::from_slice(input).context("unable to decode activity")?;
            let clock = config.codec.clock()?;
            let document = activity
                .encode_with(clock.as_ref())
                .context("unable to encode activity")?;
            Ok(Value::Object(document))
        }
        Mode::Decode => {
            let activity = Activity::from_slice(input).context("unable to decode activity")?;
            Ok(summarize(&activity))
        }
        Mode::Groups => {
            let listing =
                GroupedActivities::from_slice(input).context("unable to decode listing")?;
            info!(groups = listing.groups.len(), next = %listing.next, "decoded grouped listing");
            let groups: Vec<_> = listing.groups.iter().map(summarize_group).collect();
            Ok(json!({
                "duration": listing.duration,
                "next": listing.next,
                "groups": groups,
            }))
        }
        Mode::Followers => {
            let followers =
                Followers::from_slice(input).context("unable to decode followers")?;
            info!(followers = followers.followers.len(), "decoded followers");
            let entries: Vec<_> = followers
                .followers
                .iter()
                .map(|follower| {
                    json!({
                        "feed_id": follower.feed_id,
                        "target_id": follower.target_id,
                        "created_at": follower.created_at,
                        "updated_at": follower.updated_at,
                    })
                })
                .collect();
            Ok(json!({
                "duration": followers.duration,
                "followers": entries,
            }))
        }
    }
}

/// Typed view of a decoded activity. Unlike the encoder this never invents a
/// timestamp or rejects a foreign id.
fn summarize(activity: &Activity) -> Value {
    let to: Vec<_> = activity.to.iter().map(recipient_string).collect();
    json!({
        "id": activity.id,
        "actor": activity.actor,
        "verb": activity.verb,
        "object": activity.object,
        "target": activity.target,
        "origin": activity.origin,
        "time": activity.time.as_ref().map(format_time),
        "foreign_id": activity.foreign_id,
        "data": activity.data,
        "to": to,
        "metadata": activity.metadata,
    })
}

fn summarize_group(group: &ActivityGroup) -> Value {
    let activities: Vec<_> = group.activities.iter().map(summarize).collect();
    json!({
        "id": group.id,
        "group": group.group,
        "verb": group.verb,
        "activity_count": group.activity_count,
        "actor_count": group.actor_count,
        "created_at": group.created_at,
        "updated_at": group.updated_at,
        "activities": activities,
    })
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::json;

    use crate::config::{CodecConfig, Config};

    use super::{Mode, run};

    fn fixed_config() -> Config {
        Config {
            codec: CodecConfig {
                fixed_time: Some("2022-02-02T02:02:02.000002".to_string()),
            },
            ..Config::default()
        }
    }

    #[test]
    fn parses_modes() -> Result<()> {
        assert_eq!("encode".parse::<Mode>()?, Mode::Encode);
        assert_eq!("followers".parse::<Mode>()?, Mode::Followers);
        assert!("Encode".parse::<Mode>().is_err());
        Ok(())
    }

    #[test]
    fn encode_normalizes_document() -> Result<()> {
        let input = json!({
            "actor": "user:1",
            "verb": "post",
            "object": "note:1",
            "to": [["flat:2", "tok"]],
            "Extra": "x",
        });
        let output = run(Mode::Encode, &fixed_config(), &serde_json::to_vec(&input)?)?;
        assert_eq!(
            output,
            json!({
                "actor": "user:1",
                "verb": "post",
                "object": "note:1",
                "origin": "",
                "time": "2022-02-02T02:02:02.000002",
                "to": ["flat:2 tok"],
                "Extra": "x",
            })
        );
        Ok(())
    }

    #[test]
    fn encode_rejects_bad_foreign_id() {
        let input = br#"{"actor": "user:1", "foreign_id": "tester@mail.com"}"#;
        assert!(run(Mode::Encode, &fixed_config(), input).is_err());
    }

    #[test]
    fn decode_keeps_missing_time_empty() -> Result<()> {
        let input = br#"{"actor": "user:1", "time": "bad", "foreign_id": "abc", "k": "v"}"#;
        let output = run(Mode::Decode, &Config::default(), input)?;
        assert_eq!(output["time"], json!(null));
        assert_eq!(output["foreign_id"], "abc");
        assert_eq!(output["metadata"], json!({"k": "v"}));
        Ok(())
    }

    #[test]
    fn groups_and_followers() -> Result<()> {
        let input = br#"{"duration": "2ms", "results": [{"id": "g", "activities": [{"actor": "user:1"}]}]}"#;
        let output = run(Mode::Groups, &Config::default(), input)?;
        assert_eq!(output["groups"][0]["id"], "g");
        assert_eq!(output["groups"][0]["activities"][0]["actor"], "user:1");

        let input = br#"{"results": [{"feed_id": "timeline:1", "target_id": "user:2"}]}"#;
        let output = run(Mode::Followers, &Config::default(), input)?;
        assert_eq!(output["followers"][0]["target_id"], "user:2");
        Ok(())
    }
}
