use std::env;
use std::io::{self, Write};

use anyhow::bail;
use clap::{Parser, Subcommand};

use foodcard_rs::api_backend::staff_api;
use foodcard_rs::constants::{API_URL, CURRENCY};
use foodcard_rs::data_types::api_data_types::{parse_price, NewMenuItem};
use foodcard_rs::data_types::MealCategory;
use foodcard_rs::shared_main::{format_menu, logger_init, menu_by_category};

/// Staff CLI for the FoodCard cafeteria: manage menu items across meal
/// categories and check today's stats.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Backend API base URL
    #[arg(short, long, env = "API_URL", default_value = "http://localhost:5000")]
    api_url: String,
    /// Enable verbose logging{n}[SETS env: RUST_LOG=debug]
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List menu items, optionally one category
    List { category: Option<MealCategory> },
    /// Per-category item counts and today's popular items
    Stats,
    /// Create a menu item
    Add {
        name: String,
        price: String,
        category: MealCategory,
        image_url: String,
    },
    /// Update a menu item; omitted fields keep their current value
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        category: Option<MealCategory>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete a menu item (asks for confirmation unless --yes)
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        env::set_var("RUST_LOG", "debug");
    }
    logger_init(module_path!());

    API_URL.get_or_init(|| args.api_url.clone());

    match args.command {
        Command::List { category } => list_items(category).await,
        Command::Stats => show_stats().await,
        Command::Add {
            name,
            price,
            category,
            image_url,
        } => add_item(name, price, category, image_url).await,
        Command::Update {
            id,
            name,
            price,
            category,
            image_url,
        } => update_item(id, name, price, category, image_url).await,
        Command::Delete { id, yes } => delete_item(id, yes).await,
    }
}

async fn list_items(category: Option<MealCategory>) -> anyhow::Result<()> {
    let menu = staff_api::fetch_staff_menu().await?;
    match category {
        Some(category) => {
            let items = menu_by_category(&menu, category);
            println!("{category} — {} items", items.len());
            for item in items {
                println!(" • [{}] {} — {}{}", item.id, item.name, CURRENCY, item.price);
            }
        }
        None => print!("{}", format_menu(&menu)),
    }
    Ok(())
}

async fn show_stats() -> anyhow::Result<()> {
    let menu = staff_api::fetch_staff_menu().await?;
    let stats = staff_api::fetch_menu_stats().await?;

    println!("{} menu items total", menu.len());
    for category in MealCategory::ALL {
        println!("  {category}: {}", menu_by_category(&menu, category).len());
    }

    if stats.stats.popular_items.is_empty() {
        println!("No orders today");
    } else {
        println!("Popular today:");
        for item in &stats.stats.popular_items {
            println!("  {} — {} orders", item.name, item.count);
        }
    }
    Ok(())
}

async fn add_item(
    name: String,
    price: String,
    category: MealCategory,
    image_url: String,
) -> anyhow::Result<()> {
    let item = NewMenuItem {
        name,
        price: parse_price(&price)?,
        category,
        image_url,
    };
    item.validate()?;

    let created = staff_api::create_menu_item(&item).await?;
    log::info!("created menu item {}", created.id);
    println!("Menu item added successfully!");

    // refresh the list the way the dashboard does after a write
    let menu = staff_api::fetch_staff_menu().await?;
    println!(
        "{}: {} items",
        created.category,
        menu_by_category(&menu, created.category).len()
    );
    Ok(())
}

async fn update_item(
    id: String,
    name: Option<String>,
    price: Option<String>,
    category: Option<MealCategory>,
    image_url: Option<String>,
) -> anyhow::Result<()> {
    let menu = staff_api::fetch_staff_menu().await?;
    let Some(existing) = menu.iter().find(|m| m.id == id) else {
        bail!("no menu item with id '{}'", id);
    };

    let item = NewMenuItem {
        name: name.unwrap_or_else(|| existing.name.clone()),
        price: match price {
            Some(raw) => parse_price(&raw)?,
            None => existing.price,
        },
        category: category.unwrap_or(existing.category),
        image_url: image_url.unwrap_or_else(|| existing.image_url.clone()),
    };
    item.validate()?;

    let updated = staff_api::update_menu_item(&id, &item).await?;
    log::info!("updated menu item {}", updated.id);
    println!("Menu item updated successfully!");
    Ok(())
}

async fn delete_item(id: String, yes: bool) -> anyhow::Result<()> {
    if !yes {
        print!("Are you sure you want to delete this menu item? [y/N] ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        if !line.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let message = staff_api::delete_menu_item(&id).await?;
    println!("{message}");
    Ok(())
}
