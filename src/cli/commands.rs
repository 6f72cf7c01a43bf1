//! CLI commands and argument parsing

use crate::pagination::PageParams;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CRM object retrieval CLI
#[derive(Parser, Debug)]
#[command(name = "crm-cdk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a single page
    List {
        /// Object type
        object: ObjectType,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Fetch one object by id
    Get {
        /// Object type
        object: ObjectType,

        /// Object id
        id: String,

        /// Properties to return (repeatable)
        #[arg(short, long = "property")]
        properties: Vec<String>,
    },

    /// Print every object, one per line, as pages arrive
    Stream {
        /// Object type
        object: ObjectType,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Collect every object, then print them
    All {
        /// Object type
        object: ObjectType,

        #[command(flatten)]
        query: QueryArgs,
    },
}

/// CRM object types the CLI can reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ObjectType {
    Contacts,
    Companies,
    Deals,
}

/// Query parameters shared by the listing commands
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Page size
    #[arg(long)]
    pub limit: Option<u32>,

    /// Start from this cursor
    #[arg(long)]
    pub after: Option<String>,

    /// Properties to return (repeatable)
    #[arg(short, long = "property")]
    pub properties: Vec<String>,

    /// Extra query parameter as key=value (repeatable)
    #[arg(long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// List archived objects
    #[arg(long)]
    pub archived: bool,
}

impl QueryArgs {
    /// Page parameters for these flags
    pub fn to_params(&self) -> PageParams {
        let mut params = PageParams::new();
        for (key, value) in &self.params {
            params.set(key.as_str(), value.as_str());
        }
        if let Some(limit) = self.limit {
            params = params.limit(limit);
        }
        if !self.properties.is_empty() {
            params = params.properties(self.properties.iter().cloned());
        }
        if self.archived {
            params = params.archived(true);
        }
        if let Some(after) = &self.after {
            params = params.after(after.as_str());
        }
        params
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one value per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QueryValue;

    #[test]
    fn test_parse_list_command() {
        let cli = Cli::parse_from([
            "crm-cdk",
            "-f",
            "pretty",
            "list",
            "contacts",
            "--limit",
            "2",
            "-p",
            "email",
            "--property",
            "firstname",
            "--param",
            "idProperty=email",
        ]);

        assert_eq!(cli.format, OutputFormat::Pretty);
        let Commands::List { object, query } = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(object, ObjectType::Contacts);

        let params = query.to_params();
        assert_eq!(params.get("limit"), Some(&QueryValue::from("2")));
        assert_eq!(
            params.get("properties"),
            Some(&QueryValue::Multi(vec![
                "email".to_string(),
                "firstname".to_string()
            ]))
        );
        assert_eq!(params.get("idProperty"), Some(&QueryValue::from("email")));
        assert!(params.get("after").is_none());
        assert!(params.get("archived").is_none());
    }

    #[test]
    fn test_parse_get_command() {
        let cli = Cli::parse_from(["crm-cdk", "-C", "crm.yaml", "get", "deals", "77"]);
        assert_eq!(cli.config, Some(PathBuf::from("crm.yaml")));
        let Commands::Get { object, id, properties } = cli.command else {
            panic!("expected get command");
        };
        assert_eq!(object, ObjectType::Deals);
        assert_eq!(id, "77");
        assert!(properties.is_empty());
    }

    #[test]
    fn test_flags_override_raw_params() {
        let cli = Cli::parse_from([
            "crm-cdk", "all", "companies", "--param", "limit=50", "--limit", "10", "--archived",
        ]);
        let Commands::All { query, .. } = cli.command else {
            panic!("expected all command");
        };
        let params = query.to_params();
        assert_eq!(params.get("limit"), Some(&QueryValue::from("10")));
        assert_eq!(params.get("archived"), Some(&QueryValue::from("true")));
    }

    #[test]
    fn test_bad_param_rejected() {
        assert!(Cli::try_parse_from(["crm-cdk", "stream", "deals", "--param", "novalue"]).is_err());
        assert!(Cli::try_parse_from(["crm-cdk", "stream", "deals", "--param", "=x"]).is_err());
        assert!(Cli::try_parse_from(["crm-cdk", "list", "tickets"]).is_err());
    }
}
