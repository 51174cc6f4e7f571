//! Interactive feed. Card state (likes, shares, follows) lives for the
//! session only.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use glance_core::services::{Feed, FeedOrder, FeedView, can_follow};
use glance_core::{DomainError, Notice};

use crate::render;
use crate::state::AppState;

const HELP: &str = "\
Commands:
  list                     show the feed
  order latest|popular     change the feed order
  like <id>                like or unlike a glance
  share <id>               share a glance
  follow <id>              follow or unfollow the author
  open <id>                show a glance with its comments
  comment <text>           comment on the open glance
  close                    close the open glance
  reload                   reload the feed from storage
  help                     show this help
  quit                     leave the shell";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    List,
    Order(FeedOrder),
    Like(String),
    Share(String),
    Follow(String),
    Open(String),
    Comment(String),
    Close,
    Reload,
    Help,
    Quit,
}

fn parse(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let id = || {
        if rest.is_empty() {
            Err(format!("Usage: {verb} <id>"))
        } else {
            Ok(rest.to_string())
        }
    };

    match verb {
        "list" | "ls" => Ok(ShellCommand::List),
        "order" => match rest {
            "latest" => Ok(ShellCommand::Order(FeedOrder::Latest)),
            "popular" => Ok(ShellCommand::Order(FeedOrder::Popular)),
            _ => Err("Usage: order latest|popular".to_string()),
        },
        "like" => id().map(ShellCommand::Like),
        "share" => id().map(ShellCommand::Share),
        "follow" => id().map(ShellCommand::Follow),
        "open" => id().map(ShellCommand::Open),
        "comment" => Ok(ShellCommand::Comment(rest.to_string())),
        "close" => Ok(ShellCommand::Close),
        "reload" => Ok(ShellCommand::Reload),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("Unknown command `{other}`. Type `help`.")),
    }
}

pub async fn run(state: &AppState) -> Result<(), DomainError> {
    let mut feed = state.feed().await?;
    let viewer = state.session.current_user().await?;
    print_feed(&mut feed);
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&feed).await;
        let Ok(Some(line)) = lines.next_line().await else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse(&line) {
            Ok(command) => command,
            Err(usage) => {
                println!("{usage}");
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::List => print_feed(&mut feed),
            ShellCommand::Order(order) => {
                feed.set_order(order);
                print_feed(&mut feed);
            }
            ShellCommand::Reload => {
                feed.activate().await?;
                print_feed(&mut feed);
            }
            ShellCommand::Like(id) => match feed.card(&id) {
                Some(card) => {
                    let liked = card.toggle_like();
                    println!("{} {}", if liked { "♥" } else { "♡" }, card.likes);
                }
                None => report_missing(&id),
            },
            ShellCommand::Share(id) => match feed.card(&id) {
                Some(card) => {
                    if card.share() {
                        render::notice(&Notice::success("Link copied!", format!("glance://g/{id}")));
                    } else {
                        println!("Already shared.");
                    }
                }
                None => report_missing(&id),
            },
            ShellCommand::Follow(id) => {
                let Some(glance) = feed.glance(&id) else {
                    report_missing(&id);
                    continue;
                };
                if !can_follow(glance, viewer.as_ref().map(|u| u.id.as_str())) {
                    println!("That's your own glance.");
                    continue;
                }
                let author = glance.author.username.clone();
                if let Some(card) = feed.card(&id) {
                    let following = card.toggle_follow();
                    println!("{} @{author}", if following { "Following" } else { "Unfollowed" });
                }
            }
            ShellCommand::Open(id) => match feed.open_overlay(&id) {
                Ok(glance) => println!("{}", render::detail(glance)),
                Err(e) => render::notice(&Notice::from(&e)),
            },
            ShellCommand::Close => feed.close_overlay(),
            ShellCommand::Comment(text) => {
                let Some(id) = feed.overlay().map(|g| g.id.clone()) else {
                    println!("Open a glance first.");
                    continue;
                };
                let Some(author) = viewer.clone() else {
                    render::notice(&Notice::from(&DomainError::Unauthenticated));
                    continue;
                };
                match feed.add_comment(&id, author, &text).await {
                    Ok(added) => {
                        if let Some(notice) = &added.notice {
                            render::notice(notice);
                        }
                        if let Some(glance) = feed.overlay() {
                            println!("{}", render::detail(glance));
                        }
                    }
                    Err(e) => render::notice(&Notice::from(&e)),
                }
            }
        }
    }

    Ok(())
}

fn print_feed(feed: &mut Feed) {
    let ids: Vec<String> = match feed.view() {
        FeedView::Loading => {
            println!("Loading feed...");
            return;
        }
        FeedView::Ready(glances) => glances.iter().map(|g| g.id.clone()).collect(),
    };

    for id in ids {
        let Some(glance) = feed.glance(&id).cloned() else {
            continue;
        };
        let card = feed.card(&id).cloned();
        println!("{}\n", render::card(&glance, card.as_ref()));
    }
}

async fn prompt(feed: &Feed) {
    let prompt = match feed.overlay() {
        Some(glance) => format!("glance:{}> ", glance.id),
        None => "glance> ".to_string(),
    };
    let mut stdout = tokio::io::stdout();
    let _ = stdout.write_all(prompt.as_bytes()).await;
    let _ = stdout.flush().await;
}

fn report_missing(id: &str) {
    render::notice(&Notice::from(&DomainError::NotFound {
        entity_type: "Glance",
        id: id.to_string(),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("like g1"), Ok(ShellCommand::Like("g1".to_string())));
        assert_eq!(parse("  open   g3 "), Ok(ShellCommand::Open("g3".to_string())));
        assert_eq!(parse("order popular"), Ok(ShellCommand::Order(FeedOrder::Popular)));
        assert_eq!(
            parse("comment Looks great!"),
            Ok(ShellCommand::Comment("Looks great!".to_string()))
        );
        assert_eq!(parse("exit"), Ok(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_missing_ids_and_unknown_verbs() {
        assert!(parse("like").is_err());
        assert!(parse("order newest").is_err());
        assert!(parse("dance").is_err());
    }
}
