mod actor_framework;
mod app_system;
mod cli;
mod domain;
mod session;
mod store;
mod view;

#[cfg(test)]
mod mock_framework;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn, Instrument};

use crate::app_system::{setup_tracing, DeskSystem};
use crate::cli::{AdminCommand, Cli, Command};
use crate::session::OrderError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let cli = Cli::parse();
    let config = cli.desk_config()?;
    let system = DeskSystem::start(config)
        .await
        .context("failed to start order desk")?;

    let span = tracing::info_span!("command");
    let result = run(&system, cli.command).instrument(span).await;

    system.shutdown().await;

    match result {
        Err(e) if e.is_user_facing() => {
            warn!(error = %e, "Request rejected");
            eprintln!("warning: {e}");
            Ok(())
        }
        other => other.map_err(anyhow::Error::from),
    }
}

async fn run(system: &DeskSystem, command: Command) -> Result<(), OrderError> {
    let interval = system.config().refresh_interval();

    match command {
        Command::Menu => print!("{}", view::render_menu(system.menu())),
        Command::Order { table, items } => {
            let mut session = system.customer_session();
            for item in &items {
                session.add_to_cart(item)?;
            }
            let order_id = session.place_order(&table).await?;
            println!("Order placed: {order_id}");
            println!("Track it with: order-desk track {order_id}");
        }
        Command::Track { order_id, watch } => {
            let session = system.customer_session();
            let tracking = session.track_order(&order_id).await?;
            print!("{}", view::render_ticket(&tracking));

            if watch && !tracking.order.status.is_terminal() {
                let (mut statuses, handle) =
                    session.watch_order(&order_id, Some(tracking.order.status), interval);
                loop {
                    tokio::select! {
                        changed = statuses.changed() => {
                            if changed.is_err() {
                                break;
                            }
                        }
                        _ = tokio::signal::ctrl_c() => break,
                    }
                    let status = *statuses.borrow_and_update();
                    let Some(status) = status else {
                        println!("Order {order_id} is no longer on the board.");
                        break;
                    };
                    println!("Status: {status}");
                    if status.is_terminal() {
                        if status.accepts_feedback() {
                            println!("Your order is complete. Tell us how it was with `feedback`.");
                        }
                        break;
                    }
                }
                drop(statuses);
                handle.abort();
            }
        }
        Command::Feedback {
            name,
            rating,
            comments,
        } => {
            system
                .customer_session()
                .submit_feedback(&name, rating, &comments)
                .await?;
            println!("Thank you for your feedback!");
        }
        Command::Admin(admin_command) => {
            let mut admin = system.admin_session();
            admin.refresh().await?;

            match admin_command {
                AdminCommand::List => {
                    print!("{}", view::render_board(&admin.list_orders(), &admin.summary()));
                }
                AdminCommand::SetStatus { order_id, status } => {
                    let previous = admin.set_status(&order_id, status).await?;
                    println!("Order {order_id}: {previous} -> {status}");
                }
                AdminCommand::Advance { order_id } => match admin.advance(&order_id).await? {
                    Some(status) => println!("Order {order_id} is now {status}"),
                    None => println!("Order {order_id} is already finished"),
                },
                AdminCommand::Purge => {
                    let removed = admin.delete_completed().await?;
                    println!("Deleted {removed} completed orders");
                }
                AdminCommand::Watch => {
                    info!(interval_secs = interval.as_secs(), "Watching the board");
                    let (mut board, handle) = admin.spawn_board_refresher(interval);
                    loop {
                        tokio::select! {
                            changed = board.changed() => {
                                if changed.is_err() {
                                    break;
                                }
                            }
                            _ = tokio::signal::ctrl_c() => break,
                        }
                        let snapshot = board.borrow_and_update().clone();
                        admin.apply_refresh(snapshot);
                        println!("{}", view::render_board(&admin.list_orders(), &admin.summary()));
                    }
                    drop(board);
                    handle.abort();
                }
            }
        }
    }

    Ok(())
}
