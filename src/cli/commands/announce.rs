use crate::cli::commands::signed_in;
use crate::cli::parser::{AnnounceCmd, Cli, Commands};
use crate::config::Config;
use crate::core::announcement::{AnnouncementLogic, AnnouncementPatch};
use crate::errors::{AppError, AppResult};
use crate::models::{AnnouncementCategory, Priority};
use crate::ui::messages::{header, info, success};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Announce { action } = &cli.command else {
        return Ok(());
    };
    let (pool, me) = signed_in(cli, cfg)?;

    match action {
        AnnounceCmd::Add {
            title,
            content,
            category,
            priority,
        } => {
            let id = AnnouncementLogic::create(
                &pool.conn,
                &me,
                title,
                content,
                parse_category(category)?,
                parse_priority(priority)?,
            )?;
            success(format!("Announcement {id} published"));
        }

        AnnounceCmd::Edit {
            id,
            title,
            content,
            category,
            priority,
        } => {
            let patch = AnnouncementPatch {
                title: title.clone(),
                content: content.clone(),
                category: category.as_deref().map(parse_category).transpose()?,
                priority: priority.as_deref().map(parse_priority).transpose()?,
            };
            AnnouncementLogic::update(&pool.conn, &me, *id, &patch)?;
            success(format!("Announcement {id} updated"));
        }

        AnnounceCmd::Delete { id } => {
            AnnouncementLogic::delete(&pool.conn, &me, *id)?;
            success(format!("Announcement {id} deleted"));
        }

        AnnounceCmd::List { category } => {
            let filter = category.as_deref().map(parse_category).transpose()?;
            let list = AnnouncementLogic::list(&pool.conn, filter)?;

            header("Announcements");
            if list.is_empty() {
                info("No announcements.");
            }
            for a in &list {
                let flag = match a.priority {
                    Priority::Urgent => "[URGENT] ",
                    Priority::High => "[HIGH] ",
                    Priority::Normal => "",
                };
                println!(
                    "#{} {}{} ({}, {})",
                    a.id,
                    flag,
                    a.title,
                    a.category.to_db_str(),
                    a.created_at
                );
                println!("    {}\n", a.content);
            }
        }
    }

    Ok(())
}

fn parse_category(s: &str) -> AppResult<AnnouncementCategory> {
    AnnouncementCategory::parse(s)
        .ok_or_else(|| AppError::Validation(format!("Invalid announcement category: {s}")))
}

fn parse_priority(s: &str) -> AppResult<Priority> {
    Priority::parse(s).ok_or_else(|| AppError::Validation(format!("Invalid priority: {s}")))
}
