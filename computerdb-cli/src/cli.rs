//! Command-line arguments.

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use computerdb_lib::api::DEFAULT_PAGE_SIZE;
use computerdb_lib::api::PageRequest;
use computerdb_lib::api::SortColumn;
use computerdb_lib::api::SortOrder;

pub const DEFAULT_URL: &str = "http://localhost:8080/ComputerDatabase/api/computers";

#[derive(Debug, Parser)]
#[command(name = "computerdb", version, about = "Client for the Computer Database REST API")]
pub struct Cli {
    /// Computers collection URL
    #[arg(long, env = "COMPUTERDB_URL", default_value = DEFAULT_URL, global = true)]
    pub url: String,

    /// Companies collection URL (defaults to the `companies` sibling of --url)
    #[arg(long, env = "COMPUTERDB_COMPANIES_URL", global = true)]
    pub companies_url: Option<String>,

    /// Login endpoint; requests are authenticated when set
    #[arg(long, env = "COMPUTERDB_AUTH_URL", global = true)]
    pub auth_url: Option<String>,

    #[arg(long, env = "COMPUTERDB_USERNAME", global = true)]
    pub username: Option<String>,

    #[arg(long, env = "COMPUTERDB_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Date template using dd, MM and yyyy (e.g. MM/dd/yyyy)
    #[arg(long, env = "COMPUTERDB_DATE_FORMAT", global = true)]
    pub date_format: Option<String>,

    /// Localized messages in .properties format
    #[arg(long, env = "COMPUTERDB_MESSAGES", global = true)]
    pub messages: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, env = "COMPUTERDB_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Also log to the terminal
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List one page of computers
    List(ListArgs),
    /// Show a single computer
    Show { id: i64 },
    /// List one page of companies
    Companies(PageArgs),
    /// Check form values without sending anything
    Validate(FormArgs),
    /// Create a computer
    Add(FormArgs),
    /// Change a computer; omitted fields keep their current value
    Edit {
        id: i64,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a computer
    Delete { id: i64 },
    /// Log in and report the issued token's lifetime
    Login,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// Zero-based page index
    #[arg(long, default_value_t = 0)]
    pub page: u32,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
}

impl PageArgs {
    pub fn request(self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Only computers whose name contains this text (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Column to sort by
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Sort in descending order (by name unless --sort is given)
    #[arg(long)]
    pub desc: bool,
}

impl ListArgs {
    pub fn request(&self) -> PageRequest {
        let mut request = self.page.request();
        if let Some(search) = &self.search {
            request = request.search(search);
        }
        let order = if self.desc { SortOrder::Desc } else { SortOrder::Asc };
        match (self.sort, self.desc) {
            (Some(column), _) => request.sort(column.into(), order),
            (None, true) => request.sort(SortColumn::Name, order),
            (None, false) => request,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    Introduced,
    Discontinued,
    Company,
    CompanyId,
}

impl From<SortArg> for SortColumn {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortColumn::Name,
            SortArg::Introduced => SortColumn::Introduced,
            SortArg::Discontinued => SortColumn::Discontinued,
            SortArg::Company => SortColumn::CompanyName,
            SortArg::CompanyId => SortColumn::CompanyId,
        }
    }
}

/// Raw form values, as a user would type them.
#[derive(Debug, Clone, Default, Args)]
pub struct FormArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub introduced: Option<String>,

    #[arg(long)]
    pub discontinued: Option<String>,

    /// Company id
    #[arg(long)]
    pub company: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_edit() {
        let cli = Cli::try_parse_from([
            "computerdb",
            "edit",
            "42",
            "--name",
            "Apple II",
            "--date-format",
            "MM/dd/yyyy",
        ])
        .unwrap();

        assert_eq!(cli.date_format.as_deref(), Some("MM/dd/yyyy"));
        match cli.command {
            Command::Edit { id, form } => {
                assert_eq!(id, 42);
                assert_eq!(form.name.as_deref(), Some("Apple II"));
                assert_eq!(form.introduced, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_page_defaults() {
        let cli = Cli::try_parse_from(["computerdb", "list"]).unwrap();
        match cli.command {
            Command::List(args) => {
                assert_eq!(args.page.page, 0);
                assert_eq!(args.page.page_size, DEFAULT_PAGE_SIZE);
                assert_eq!(args.request(), PageRequest::default());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_and_sort() {
        let cli = Cli::try_parse_from([
            "computerdb",
            "list",
            "--page",
            "3",
            "--search",
            "Apple",
            "--sort",
            "company-id",
            "--desc",
        ])
        .unwrap();

        match cli.command {
            Command::List(args) => {
                let request = args.request();
                assert_eq!(request.page, 3);
                assert_eq!(request.search.as_deref(), Some("apple"));
                assert_eq!(request.sort, Some((SortColumn::CompanyId, SortOrder::Desc)));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["computerdb", "list", "--desc"]).unwrap();
        match cli.command {
            Command::List(args) => {
                assert_eq!(args.request().sort, Some((SortColumn::Name, SortOrder::Desc)));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
