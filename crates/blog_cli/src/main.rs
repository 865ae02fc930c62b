//! `blog` command-line entry point.
//!
//! # Responsibility
//! - Wire CLI configuration to `blog_core` services.
//! - Report validation failures verbatim and exit non-zero.

mod config;

use anyhow::{Context, Result};
use blog_core::db::open_db;
use blog_core::{
    default_log_level, init_logging, Author, AuthorListQuery, AuthorService, Category, NewPost,
    Post, PostListQuery, PostService, SqliteAuthorRepository, SqlitePostRepository,
};
use clap::Parser;
use config::{AuthorCommand, CliConfig, Command, PostCommand};
use log::info;

fn main() -> Result<()> {
    let config = CliConfig::parse();

    if let Some(log_dir) = config.log_dir.as_deref() {
        let level = config.log_level.unwrap_or_else(default_log_level);
        init_logging(level, log_dir).context("failed to start logging")?;
    }

    if let Command::Ping = config.command {
        println!("blog_core ping={}", blog_core::ping());
        println!("blog_core version={}", blog_core::core_version());
        return Ok(());
    }

    let conn = open_db(&config.db)
        .with_context(|| format!("failed to open database `{}`", config.db.display()))?;
    info!("event=cli_command module=cli status=start");

    match config.command {
        Command::Ping => {}
        Command::Author(command) => {
            let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn)?);
            run_author(&service, command)?;
        }
        Command::Post(command) => {
            let service = PostService::new(SqlitePostRepository::try_new(&conn)?);
            run_post(&service, command)?;
        }
    }

    Ok(())
}

fn run_author(
    service: &AuthorService<SqliteAuthorRepository<'_>>,
    command: AuthorCommand,
) -> Result<()> {
    match command {
        AuthorCommand::Add { name, phone } => print_author(&service.create_author(name, phone)?),
        AuthorCommand::List { limit, offset } => {
            for author in service.list_authors(&AuthorListQuery { limit, offset })? {
                print_author(&author);
            }
        }
        AuthorCommand::Rename { id, name } => print_author(&service.set_name(id, name)?),
        AuthorCommand::SetPhone { id, phone } => {
            print_author(&service.set_phone_number(id, phone)?)
        }
        AuthorCommand::Delete { id } => {
            service.delete_author(id)?;
            println!("deleted author {id}");
        }
    }
    Ok(())
}

fn run_post(service: &PostService<SqlitePostRepository<'_>>, command: PostCommand) -> Result<()> {
    match command {
        PostCommand::Add {
            title,
            content,
            summary,
            category,
        } => {
            let post = service.create_post(&NewPost {
                title,
                content,
                summary,
                category,
            })?;
            print_post(&post);
        }
        PostCommand::List {
            category,
            limit,
            offset,
        } => {
            let category = category
                .as_deref()
                .map(str::parse::<Category>)
                .transpose()?;
            for post in service.list_posts(&PostListQuery {
                category,
                limit,
                offset,
            })? {
                print_post(&post);
            }
        }
        PostCommand::SetTitle { id, title } => print_post(&service.set_title(id, title)?),
        PostCommand::SetContent { id, content } => print_post(&service.set_content(id, content)?),
        PostCommand::SetSummary { id, summary } => print_post(&service.set_summary(id, summary)?),
        PostCommand::SetCategory { id, category } => {
            print_post(&service.set_category(id, category.as_deref())?)
        }
        PostCommand::Delete { id } => {
            service.delete_post(id)?;
            println!("deleted post {id}");
        }
    }
    Ok(())
}

fn print_author(author: &Author) {
    println!(
        "{}\t{}\t{}",
        author.id().unwrap_or_default(),
        author.name(),
        author.phone_number().unwrap_or("-")
    );
}

fn print_post(post: &Post) {
    println!(
        "{}\t{}\t{}",
        post.id().unwrap_or_default(),
        post.category().map_or("-", Category::as_str),
        post.title()
    );
}
