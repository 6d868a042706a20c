use crate::codec;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

mod demo;

pub use demo::{run_demo, DemoReport, DemoStep};

const USAGE: &str = "popwin [demo | encode <password> | decode <stored>]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Scripted popup session printed as a JSON report.
    Demo,
    Encode(String),
    Decode(String),
}

impl Command {
    /// Parses the arguments that follow the program name.
    pub fn parse<I, S>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        match args.as_slice() {
            [] => Ok(Self::Demo),
            [command] if command == "demo" => Ok(Self::Demo),
            [command, text] if command == "encode" => Ok(Self::Encode(text.clone())),
            [command, text] if command == "decode" => Ok(Self::Decode(text.clone())),
            _ => Err(AppError::Usage(USAGE.to_string())),
        }
    }
}

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Runs `command` and returns what it would print.
    pub fn execute(&self, command: &Command) -> AppResult<String> {
        tracing::debug!(?command, "executing command");
        match command {
            Command::Demo => {
                let report = run_demo(&self.config)?;
                tracing::info!(
                    steps = report.steps.len(),
                    surfaces = report.surfaces_created,
                    "demo finished"
                );
                Ok(serde_json::to_string_pretty(&report)?)
            }
            Command::Encode(clear_text) => Ok(codec::encode(clear_text)?),
            Command::Decode(stored) => Ok(codec::decode(stored)?.unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;

    #[test]
    fn parse_defaults_to_demo() {
        assert_eq!(
            Command::parse(Vec::<String>::new()).expect("empty args"),
            Command::Demo
        );
        assert_eq!(Command::parse(["demo"]).expect("demo"), Command::Demo);
    }

    #[test]
    fn parse_reads_codec_commands() {
        assert_eq!(
            Command::parse(["encode", "password"]).expect("encode"),
            Command::Encode("password".to_string())
        );
        assert_eq!(
            Command::parse(["decode", "Ay=0="]).expect("decode"),
            Command::Decode("Ay=0=".to_string())
        );
    }

    #[test]
    fn parse_rejects_unknown_or_incomplete_commands() {
        for args in [vec!["encode"], vec!["launch"], vec!["decode", "a", "b"]] {
            assert!(matches!(Command::parse(args), Err(AppError::Usage(_))));
        }
    }

    #[test]
    fn execute_runs_codec_commands() {
        let app = App::new(AppConfig::default());
        assert_eq!(
            app.execute(&Command::Encode("anon".to_string()))
                .expect("encode should work"),
            "Ay=0="
        );
        assert_eq!(
            app.execute(&Command::Decode("A:yZZ30 e".to_string()))
                .expect("decode should work"),
            "password"
        );
        assert_eq!(
            app.execute(&Command::Decode(String::new()))
                .expect("empty decode should work"),
            ""
        );
        assert!(matches!(
            app.execute(&Command::Encode("a$".to_string())),
            Err(AppError::Codec(CodecError::IllegalCharacter { position: 1, .. }))
        ));
    }

    #[test]
    fn execute_demo_prints_json_report() {
        let app = App::new(AppConfig::default());
        let output = app.execute(&Command::Demo).expect("demo should run");
        let json: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(json["surfaces_created"], json["surfaces_destroyed"]);
    }
}
