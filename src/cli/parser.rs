use crate::core::calendar::ViewMode;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for paprika
/// Restaurant roster, payroll and checklist tool on SQLite
#[derive(Parser)]
#[command(
    name = "paprika",
    version = env!("CARGO_PKG_VERSION"),
    about = "Restaurant roster, payroll and checklist tool: shifts, open-shift claims, payroll budgets and calendar exports on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Session token to use instead of the stored one
    #[arg(global = true, long = "token")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration, optionally creating the first manager
    Init {
        #[arg(long = "admin-email", requires_all = ["admin_password", "admin_name"])]
        admin_email: Option<String>,

        #[arg(long = "admin-password")]
        admin_password: Option<String>,

        #[arg(long = "admin-name")]
        admin_name: Option<String>,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their defaults")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Sign in and store the session token next to the database
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign out and forget the stored session token
    Logout,

    /// Show the signed-in profile
    Whoami,

    /// Manage employees (managers only, except `list`)
    Employee {
        #[command(subcommand)]
        action: EmployeeCmd,
    },

    /// Manage shifts, open shifts and claims
    Shift {
        #[command(subcommand)]
        action: ShiftCmd,
    },

    /// Payroll for a day (with budget check) or a range
    Payroll {
        #[arg(long, value_name = "YYYY-MM-DD", conflicts_with = "range")]
        date: Option<String>,

        #[arg(long, value_name = "RANGE", help = "YYYY, YYYY-MM, or FROM:TO")]
        range: Option<String>,
    },

    /// Hours and pay of your own shifts over a week or month
    Earnings {
        #[arg(long, value_enum, default_value = "week")]
        period: PeriodArg,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Any day inside the period")]
        date: Option<String>,

        #[arg(long, help = "Another employee (managers only)")]
        employee: Option<i64>,
    },

    /// Week or month schedule grid
    Calendar {
        #[arg(long, value_enum, default_value = "week")]
        view: PeriodArg,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Reference day")]
        date: Option<String>,

        #[arg(long, conflicts_with = "next", help = "Move one period back")]
        prev: bool,

        #[arg(long, help = "Move one period forward")]
        next: bool,

        #[arg(long, help = "Only this employee's shifts (managers only)")]
        employee: Option<i64>,
    },

    /// Announcements board
    Announce {
        #[command(subcommand)]
        action: AnnounceCmd,
    },

    /// Equipment and supply complaints
    Complaint {
        #[command(subcommand)]
        action: ComplaintCmd,
    },

    /// Store settings (daily payroll limit)
    Settings {
        #[arg(long = "daily-limit", value_name = "AMOUNT")]
        daily_limit: Option<f64>,

        #[arg(long = "print")]
        print: bool,
    },

    /// Export payroll, a calendar file or the monthly schedule PDF
    Export {
        #[arg(value_enum)]
        what: ExportKind,

        #[arg(long, value_enum, default_value = "csv", help = "Payroll format")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, help = "Employee whose calendar to export (managers only)")]
        employee: Option<i64>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Checklist dashboard over the demo store
    Dashboard {
        #[arg(value_enum, default_value = "worker")]
        view: DashboardView,

        #[arg(long, help = "Employee id for the worker view (e.g. emp-2)")]
        employee: Option<String>,

        #[arg(long, help = "Print the end-of-day summary")]
        summary: bool,

        #[arg(long, value_name = "CHECKLIST", help = "Task breakdown of one checklist")]
        detail: Option<String>,

        #[arg(long = "set", value_name = "TASK=VALUE", help = "Update a task before rendering")]
        set: Vec<String>,

        #[arg(long = "read", value_name = "NOTIFICATION", help = "Mark a notification as read")]
        read: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCmd {
    /// Create an employee login and profile
    Add {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "employee")]
        role: String,
        #[arg(long)]
        wage: String,
    },

    /// Change an employee's email, password, name, role or wage
    Update {
        id: i64,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        wage: Option<String>,
    },

    /// Deactivate an employee and drop their upcoming shifts
    Remove { id: i64 },

    /// List employees
    List {
        #[arg(long, help = "Include deactivated employees")]
        all: bool,
    },

    /// Change role and wage of several employees: ID:ROLE:WAGE ...
    BulkEdit {
        #[arg(required = true, value_name = "ID:ROLE:WAGE")]
        edits: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ShiftCmd {
    /// Add a shift; without --employee it is an open shift
    Add {
        date: String,
        #[arg(long = "start")]
        start: String,
        #[arg(long = "end")]
        end: String,
        #[arg(long, default_value = "kitchen")]
        role: String,
        #[arg(long)]
        employee: Option<i64>,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Edit a shift; `--employee open` unassigns it
    Edit {
        id: i64,
        #[arg(long)]
        date: Option<String>,
        #[arg(long = "start")]
        start: Option<String>,
        #[arg(long = "end")]
        end: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        employee: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a shift
    Delete { id: i64 },

    /// List shifts in a range
    List {
        #[arg(long, value_name = "RANGE", help = "YYYY, YYYY-MM, YYYY-MM-DD or FROM:TO")]
        range: Option<String>,

        #[arg(long)]
        employee: Option<i64>,
    },

    /// Open shifts from a date on (default: today)
    Open {
        #[arg(long, value_name = "YYYY-MM-DD")]
        from: Option<String>,
    },

    /// Claim an open shift
    Claim { id: i64 },

    /// Create shifts for a date range, selected weekdays and employees
    BulkCreate {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long, help = "Comma separated weekdays, e.g. mon,wed,fri")]
        weekdays: String,
        #[arg(long = "assign", required = true, value_name = "EMP,START,END,ROLE")]
        assign: Vec<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Apply the same change to several shifts
    BulkEdit {
        #[arg(required = true)]
        ids: Vec<i64>,
        #[arg(long)]
        employee: Option<String>,
        #[arg(long = "start")]
        start: Option<String>,
        #[arg(long = "end")]
        end: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },

    /// Delete several shifts
    BulkDelete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

#[derive(Subcommand)]
pub enum AnnounceCmd {
    /// Publish an announcement
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long, default_value = "general")]
        category: String,
        #[arg(long, default_value = "normal")]
        priority: String,
    },

    /// Edit an announcement
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },

    /// Delete an announcement
    Delete { id: i64 },

    /// List announcements, most urgent first
    List {
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ComplaintCmd {
    /// Report a problem
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "other")]
        category: String,
        #[arg(long, default_value = "medium")]
        urgency: String,
    },

    /// Change the status of a complaint (managers only)
    Status {
        id: i64,
        #[arg(value_name = "open|in_progress|resolved")]
        status: String,
    },

    /// List complaints, newest first
    List {
        #[arg(long)]
        status: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    Week,
    Month,
}

impl From<PeriodArg> for ViewMode {
    fn from(p: PeriodArg) -> Self {
        match p {
            PeriodArg::Week => ViewMode::Week,
            PeriodArg::Month => ViewMode::Month,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Payroll,
    Ics,
    Schedule,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DashboardView {
    Worker,
    Manager,
    Oil,
    Events,
    Notifications,
}

impl DashboardView {
    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardView::Worker => "worker",
            DashboardView::Manager => "manager",
            DashboardView::Oil => "oil",
            DashboardView::Events => "events",
            DashboardView::Notifications => "notifications",
        }
    }
}
