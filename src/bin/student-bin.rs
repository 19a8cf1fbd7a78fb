use std::env;
use std::io::{self, Write};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use foodcard_rs::api_backend::student_api;
use foodcard_rs::cart::Cart;
use foodcard_rs::checkout::{Checkout, CheckoutState};
use foodcard_rs::constants::{API_URL, CURRENCY};
use foodcard_rs::data_types::MealCategory;
use foodcard_rs::session::{self, Credentials, Session};
use foodcard_rs::shared_main::{
    build_qr_payload, format_history, format_menu, format_order, logger_init, menu_by_category,
    todays_order_counts, NoticeBoard,
};
use foodcard_rs::wallet_gate::{self, VerifyRound, WalletGate};

/// Student CLI for the FoodCard cafeteria: browse the menu, place orders
/// against your wallet, and review today's orders and history.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Backend API base URL
    #[arg(short, long, env = "API_URL", default_value = "http://localhost:5000")]
    api_url: String,
    /// Account email
    #[arg(short, long, env = "FOODCARD_EMAIL")]
    email: String,
    /// Account password
    #[arg(short, long, env = "FOODCARD_PASSWORD")]
    password: String,
    /// Enable verbose logging (mostly fetch timings){n}[SETS env: RUST_LOG=debug]
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the menu, optionally a single category
    Menu { category: Option<MealCategory> },
    /// Show today's orders with per-category counts
    Today,
    /// Show order history grouped by day
    History,
    /// Place an order for the given category; repeat an item name to raise
    /// its quantity
    Order {
        category: MealCategory,
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Unlock the wallet top-up action via emailed OTP
    Wallet,
    /// Create a student account with the given display name, using --email
    /// and --password as the credentials
    Register { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        env::set_var("RUST_LOG", "debug");
    }
    logger_init(module_path!());

    API_URL.get_or_init(|| args.api_url.clone());

    // registration happens before a session exists
    if let Command::Register { name } = &args.command {
        let message = session::register(name, &args.email, &args.password).await?;
        println!("{message}");
        return Ok(());
    }

    let session = session::login(&Credentials {
        email: args.email,
        password: args.password,
    })
    .await
    .context("login failed")?;
    log::info!("Logged in as {} ({})", session.name, session.role);

    let result = match args.command {
        Command::Menu { category } => show_menu(category).await,
        Command::Today => show_today(&session).await,
        Command::History => show_history(&session).await,
        Command::Order { category, items } => place_order(&session, category, items).await,
        Command::Wallet => wallet_flow(&session).await,
        Command::Register { .. } => unreachable!("handled before login"),
    };

    session::logout(session);
    result
}

async fn show_menu(category: Option<MealCategory>) -> anyhow::Result<()> {
    let menu = student_api::fetch_menu().await?;
    match category {
        Some(category) => {
            println!("{category}");
            for item in menu_by_category(&menu, category) {
                println!(" • {} — {}{}", item.name, CURRENCY, item.price);
            }
        }
        None => print!("{}", format_menu(&menu)),
    }
    Ok(())
}

async fn show_today(session: &Session) -> anyhow::Result<()> {
    let orders = student_api::fetch_todays_orders(&session.user_id).await?;
    for (category, count) in todays_order_counts(&orders) {
        println!("{category}: {count}");
    }
    for order in &orders {
        print!("{}", format_order(order));
    }
    Ok(())
}

async fn show_history(session: &Session) -> anyhow::Result<()> {
    let days = student_api::fetch_order_history(&session.user_id).await?;
    print!("{}", format_history(&days));
    Ok(())
}

async fn place_order(
    session: &Session,
    category: MealCategory,
    item_names: Vec<String>,
) -> anyhow::Result<()> {
    let profile = student_api::fetch_profile(&session.user_id).await?;
    let menu = student_api::fetch_menu().await?;

    let mut cart = Cart::new();
    let mut notices = NoticeBoard::new();
    for name in &item_names {
        match menu.iter().find(|m| m.name.eq_ignore_ascii_case(name)) {
            Some(item) => {
                let notice = cart.add_item(item);
                notices.set(notice);
            }
            None => bail!("'{}' is not on the menu", name),
        }
    }
    if let Some(text) = notices.current() {
        println!("{text}");
    }

    let mut checkout = Checkout::new();
    checkout.begin(&cart, profile.wallet_balance)?;

    println!("\nConfirm your {category} order:");
    for line in cart.lines() {
        println!(
            " • {} × {} = {}{}",
            line.name,
            line.quantity,
            CURRENCY,
            line.subtotal()
        );
    }
    println!("Total: {}{}", CURRENCY, cart.total());
    println!("Current wallet: {}{}", CURRENCY, profile.wallet_balance);
    println!(
        "Remaining wallet: {}{}",
        CURRENCY,
        profile.wallet_balance - cart.total()
    );

    if !prompt("Confirm order? [y/N] ")?.trim().eq_ignore_ascii_case("y") {
        checkout.cancel();
        println!("Order cancelled, cart kept.");
        return Ok(());
    }

    let (token, request) = checkout.confirm(&cart, &session.user_id, category)?;
    let result = student_api::submit_order(&request).await;
    checkout.complete(token, result, &mut cart);

    match checkout.state() {
        CheckoutState::Success { order, total } => {
            println!("\n✅ Order placed successfully for {CURRENCY}{total}.");
            println!("Order ID: {}", order.id);
            println!("Show this QR payload at the counter:");
            println!("{}", build_qr_payload(order, &profile.name, *total));

            // counts refresh from the server, not a local increment
            match student_api::fetch_todays_orders(&session.user_id).await {
                Ok(orders) => {
                    for (cat, count) in todays_order_counts(&orders) {
                        println!("{cat}: {count}");
                    }
                }
                Err(e) => log::warn!("could not refresh today's orders: {e}"),
            }
        }
        CheckoutState::Failed { message } => {
            log::error!("order submission failed: {message}");
            bail!("{message} (your cart was kept)");
        }
        _ => {}
    }
    checkout.acknowledge();
    Ok(())
}

async fn wallet_flow(session: &Session) -> anyhow::Result<()> {
    let profile = student_api::fetch_profile(&session.user_id).await?;

    student_api::request_wallet_otp(&session.user_id).await?;
    let mut gate = WalletGate::new();
    gate.mark_sent();
    println!("OTP sent to {}.", profile.email);

    loop {
        let code = prompt("Enter the 6-digit OTP: ")?;
        let code = code.trim();

        // format errors are caught locally and don't spend an attempt
        if let Err(e) = wallet_gate::validate_code(code) {
            println!("{e}");
            continue;
        }

        let result = student_api::verify_wallet_otp(&session.user_id, code).await;
        match gate.record_verify_result(result)? {
            VerifyRound::Verified => {
                gate.consume()?;
                println!("OTP verified successfully! Wallet top-up unlocked.");
                return Ok(());
            }
            VerifyRound::Rejected {
                message,
                locked_out,
            } => {
                println!("{message}");
                if locked_out {
                    bail!("too many failed attempts, request a new OTP");
                }
            }
            VerifyRound::TryAgain { message } => println!("{message}"),
        }
    }
}

fn prompt(text: &str) -> anyhow::Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
