use crate::cli::commands::signed_in;
use crate::cli::parser::{Cli, Commands, ComplaintCmd};
use crate::config::Config;
use crate::core::complaint::ComplaintLogic;
use crate::errors::{AppError, AppResult};
use crate::models::{ComplaintCategory, ComplaintStatus, Urgency};
use crate::ui::messages::{header, info, success};
use crate::utils::table::Table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Complaint { action } = &cli.command else {
        return Ok(());
    };
    let (pool, me) = signed_in(cli, cfg)?;

    match action {
        ComplaintCmd::Submit {
            title,
            description,
            category,
            urgency,
        } => {
            let category = ComplaintCategory::parse(category).ok_or_else(|| {
                AppError::Validation(format!("Invalid complaint category: {category}"))
            })?;
            let urgency = Urgency::parse(urgency)
                .ok_or_else(|| AppError::Validation(format!("Invalid urgency: {urgency}")))?;

            let id = ComplaintLogic::submit(&pool.conn, &me, title, description, category, urgency)?;
            success(format!("Complaint {id} submitted"));
        }

        ComplaintCmd::Status { id, status } => {
            let status = parse_status(status)?;
            let c = ComplaintLogic::set_status(&pool.conn, &me, *id, status)?;
            success(format!("Complaint {id} is now {}", c.status.to_db_str()));
        }

        ComplaintCmd::List { status } => {
            let filter = status.as_deref().map(parse_status).transpose()?;
            let list = ComplaintLogic::list(&pool.conn, filter)?;

            header("Complaints");
            if list.is_empty() {
                info("No complaints.");
                return Ok(());
            }
            let mut t = Table::new(&["id", "title", "category", "urgency", "status", "created"]);
            for c in &list {
                t.add_row(vec![
                    c.id.to_string(),
                    c.title.clone(),
                    c.category.to_db_str().to_string(),
                    c.urgency.to_db_str().to_string(),
                    c.status.to_db_str().to_string(),
                    c.created_at.clone(),
                ]);
            }
            print!("{}", t.render());
        }
    }

    Ok(())
}

fn parse_status(s: &str) -> AppResult<ComplaintStatus> {
    ComplaintStatus::parse(s)
        .ok_or_else(|| AppError::Validation(format!("Invalid complaint status: {s}")))
}
