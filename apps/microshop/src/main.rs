//! # MicroShop CLI
//!
//! Drives the client commands against the local database, the same way the
//! screens do. Every command prints its result as JSON.
//!
//! ## Usage
//! ```bash
//! # Sign in and list your listings
//! microshop login ada@mail.com secret1
//! microshop listings
//!
//! # Save a draft, then publish it (needs a seller account)
//! microshop onboard Ada Lovelace 555-0100 "1 Main St" Springfield IL 62701 000123456789 110000000
//! microshop sell "Desk lamp" 18.50 2
//!
//! # Buy one unit with Apple Pay
//! microshop buy <id> 1 buyer@mail.com Grace Hopper "2 Oak Ave" Arlington VA 22201 apple-pay
//!
//! # Use another database file
//! microshop --db ./dev.db listings
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use microshop_app::commands::checkout::PaymentMethod;
use microshop_app::commands::{auth, cart, checkout, inventory, orders, seller, theme};
use microshop_app::config::{format_currency, AppConfig};
use microshop_app::error::ApiError;
use microshop_app::routes::Route;
use microshop_app::{init_tracing, App};
use microshop_core::validation::{CheckoutForm, ListingForm};
use microshop_core::Address;

#[derive(Debug, Parser)]
#[command(name = "microshop")]
#[command(version, about = "MicroShop CLI", arg_required_else_help = true)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Database file (default: platform data dir)
    #[arg(short, long, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Title, price and optional quantity of the listing commands.
#[derive(Debug, Args)]
struct ListingArgs {
    title: String,
    /// Price in dollars, e.g. `18.50`
    price: String,
    quantity: Option<String>,
}

impl From<ListingArgs> for ListingForm {
    fn from(args: ListingArgs) -> Self {
        ListingForm {
            title: args.title,
            price: args.price,
            quantity: args.quantity.unwrap_or_default(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in
    Login { email: String, password: String },
    /// Create an account and sign in
    Register {
        name: String,
        email: String,
        password: String,
    },
    /// Sign out and clear the saved session
    Logout,
    /// Show the signed-in user
    Whoami,

    /// List your listings
    Listings,
    /// Save a draft listing
    Draft(ListingArgs),
    /// Create a listing and publish it
    Sell(ListingArgs),
    /// Edit a listing
    Edit {
        id: String,
        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Publish a listing
    Publish { id: String },
    /// Move a listing back to draft
    Unpublish { id: String },
    /// Delete a listing
    Delete { id: String },
    /// Show a public listing by slug
    Show { slug: String },
    /// Print the share link of a listing
    Share { id: String },

    /// Show the checkout summary for a listing
    Checkout {
        id: String,
        #[arg(default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..))]
        quantity: i64,
    },
    /// Buy a listing
    Buy {
        id: String,
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        quantity: i64,
        email: String,
        first: String,
        last: String,
        street: String,
        city: String,
        state: String,
        zip: String,
        #[arg(value_enum, default_value_t = PaymentMethod::Card)]
        method: PaymentMethod,
    },

    /// Create the seller payout account
    Onboard {
        first: String,
        last: String,
        phone: String,
        street: String,
        city: String,
        state: String,
        zip: String,
        account_number: String,
        routing_number: String,
    },
    /// Show seller stats
    Dashboard,

    /// Show or change the theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Show the cart
    Cart,
    /// Add a listing to the cart
    CartAdd { id: String },
    /// Empty the cart
    CartClear,

    /// List orders
    Orders,
    /// Resolve a deep link to a screen
    Open { link: String },
}

#[derive(Debug, Subcommand)]
enum ThemeAction {
    /// Toggle dark mode
    Dark,
    /// Toggle liquid glass
    Glass,
    /// Set a custom background color
    Background { color: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config);
    if cli.db.is_some() {
        config.storage.database_path = cli.db;
    }

    let app = match App::open(config).await {
        Ok(app) => app,
        Err(e) => {
            let err = ApiError::from(e);
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let result = run(&app, cli.command).await;
    app.shutdown().await;

    match result.and_then(|value| pretty(&value)) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(app: &App, command: Command) -> Result<Value, ApiError> {
    let simulation = &app.config.simulation;

    match command {
        Command::Login { email, password } => {
            debug!("Running CLI login");
            json(auth::login(&app.auth, &app.client, simulation, &email, &password).await?)
        }
        Command::Register {
            name,
            email,
            password,
        } => json(
            auth::register(&app.auth, &app.client, simulation, &name, &email, &password).await?,
        ),
        Command::Logout => {
            auth::logout(&app.auth, &app.client).await;
            Ok(Value::Null)
        }
        Command::Whoami => json(app.auth.with(|s| s.user.clone())),

        Command::Listings => {
            json(inventory::load_my_inventories(&app.inventory_api, &app.inventory).await?)
        }
        Command::Draft(listing) => json(
            inventory::save_draft(&app.inventory_api, &app.inventory, listing.into()).await?,
        ),
        Command::Sell(listing) => json(
            inventory::create_and_publish(
                &app.inventory_api,
                &app.inventory,
                &app.stripe,
                listing.into(),
            )
            .await?,
        ),
        Command::Edit { id, listing } => {
            inventory::load_my_inventories(&app.inventory_api, &app.inventory).await?;
            json(
                inventory::update_listing(&app.inventory_api, &app.inventory, &id, listing.into())
                    .await?,
            )
        }
        Command::Publish { id } => {
            inventory::load_my_inventories(&app.inventory_api, &app.inventory).await?;
            json(inventory::publish_listing(&app.inventory_api, &app.inventory, &id).await?)
        }
        Command::Unpublish { id } => {
            inventory::load_my_inventories(&app.inventory_api, &app.inventory).await?;
            json(inventory::unpublish_listing(&app.inventory_api, &app.inventory, &id).await?)
        }
        Command::Delete { id } => {
            inventory::load_my_inventories(&app.inventory_api, &app.inventory).await?;
            inventory::delete_listing(&app.inventory_api, &app.inventory, &id).await?;
            Ok(Value::Null)
        }
        Command::Show { slug } => json(inventory::public_listing(&app.inventory_api, &slug).await?),
        Command::Share { id } => {
            inventory::load_my_inventories(&app.inventory_api, &app.inventory).await?;
            json(inventory::share_link(&app.inventory, &id)?)
        }

        Command::Checkout { id, quantity } => {
            inventory::load_my_inventories(&app.inventory_api, &app.inventory).await?;
            let summary = checkout::load_checkout(&app.inventory, &id, quantity)?;
            checkout::ensure_purchasable(&summary.inventory, quantity)?;
            debug!(total = %format_currency(summary.total_cents), "Checkout summary");
            json(summary)
        }
        Command::Buy {
            id,
            quantity,
            email,
            first,
            last,
            street,
            city,
            state,
            zip,
            method,
        } => {
            debug!(id = %id, quantity, method = method.label(), "Running CLI buy");
            let form = CheckoutForm {
                email,
                first_name: first,
                last_name: last,
                address: Address {
                    street,
                    city,
                    state,
                    postal_code: zip,
                    country: "US".to_string(),
                },
            };

            inventory::load_my_inventories(&app.inventory_api, &app.inventory).await?;
            json(
                checkout::pay(
                    &app.inventory,
                    &app.inventory_api,
                    &app.checkout_api,
                    simulation,
                    &form,
                    &id,
                    quantity,
                    method,
                )
                .await?,
            )
        }

        Command::Onboard {
            first,
            last,
            phone,
            street,
            city,
            state,
            zip,
            account_number,
            routing_number,
        } => {
            let mut form = seller::onboarding_form(&app.auth);
            if form.business_name.is_empty() {
                form.business_name = format!("{} {}", first, last);
            }
            form.account_holder_name = format!("{} {}", first, last);
            form.first_name = first;
            form.last_name = last;
            form.phone = phone;
            form.street = street;
            form.city = city;
            form.state = state;
            form.zip_code = zip;
            form.account_number = account_number;
            form.routing_number = routing_number;
            json(seller::submit_onboarding(&app.stripe, &app.auth, simulation, &form).await?)
        }
        Command::Dashboard => {
            inventory::load_my_inventories(&app.inventory_api, &app.inventory).await?;
            json(seller::dashboard(&app.stripe, &app.inventory))
        }

        Command::Theme { action } => match action {
            None => json(theme::get_theme(&app.theme)),
            Some(ThemeAction::Dark) => json(theme::toggle_dark_mode(&app.theme).await),
            Some(ThemeAction::Glass) => json(theme::toggle_liquid_glass(&app.theme).await),
            Some(ThemeAction::Background { color }) => {
                json(theme::set_custom_background(&app.theme, &color).await?)
            }
        },

        Command::Cart => json(cart::get_cart(&app.cart)),
        Command::CartAdd { id } => {
            inventory::load_my_inventories(&app.inventory_api, &app.inventory).await?;
            let listing = inventory::select_listing(&app.inventory, &id)?;
            json(cart::add_listing_to_cart(&app.cart, &app.products, &listing).await)
        }
        Command::CartClear => json(cart::clear_cart(&app.cart).await),

        Command::Orders => json(orders::list_orders(&app.orders_api).await?),
        Command::Open { link } => {
            let route = Route::from_link(&link)
                .ok_or_else(|| ApiError::not_found(format!("No screen for {}", link)))?;
            if route.requires_auth() && app.auth.with(|s| !s.is_authenticated) {
                return Ok(serde_json::json!({ "route": Route::Login, "redirectFrom": route }));
            }
            json(route)
        }
    }
}

fn json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

fn pretty(value: &Value) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const BUY: [&str; 11] = [
        "microshop", "buy", "abc", "2", "buyer@mail.com", "Grace", "Hopper", "2 Oak Ave",
        "Arlington", "VA", "22201",
    ];

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_buy_parses_payment_method() {
        let cli = Cli::try_parse_from(BUY.iter().copied().chain(["apple-pay"])).unwrap();

        match cli.command {
            Command::Buy {
                id,
                quantity,
                street,
                method,
                ..
            } => {
                assert_eq!(id, "abc");
                assert_eq!(quantity, 2);
                assert_eq!(street, "2 Oak Ave");
                assert_eq!(method, PaymentMethod::ApplePay);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(BUY).unwrap();
        assert!(matches!(
            cli.command,
            Command::Buy {
                method: PaymentMethod::Card,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["microshop", "buy", "abc", "1"]).is_err());
        assert!(Cli::try_parse_from(BUY.iter().copied().chain(["paypal"])).is_err());
        assert!(Cli::try_parse_from(["microshop", "checkout", "abc", "0"]).is_err());
        assert!(Cli::try_parse_from(["microshop", "checkout", "abc", "two"]).is_err());
        assert!(Cli::try_parse_from(["microshop", "refund", "abc"]).is_err());
    }

    #[test]
    fn test_global_options_and_defaults() {
        let cli = Cli::try_parse_from(["microshop", "--db", "./dev.db", "checkout", "abc"]).unwrap();

        assert_eq!(cli.db, Some(PathBuf::from("./dev.db")));
        assert_eq!(cli.config, None);
        assert!(matches!(cli.command, Command::Checkout { quantity: 1, .. }));
    }

    #[test]
    fn test_listing_and_theme_commands() {
        let cli = Cli::try_parse_from(["microshop", "edit", "abc", "Desk lamp", "18.50"]).unwrap();
        match cli.command {
            Command::Edit { id, listing } => {
                assert_eq!(id, "abc");
                let form = ListingForm::from(listing);
                assert_eq!(form.title, "Desk lamp");
                assert_eq!(form.price, "18.50");
                assert_eq!(form.quantity, "");
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["microshop", "theme", "background", "#112233"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Theme {
                action: Some(ThemeAction::Background { ref color })
            } if color == "#112233"
        ));

        let cli = Cli::try_parse_from(["microshop", "theme"]).unwrap();
        assert!(matches!(cli.command, Command::Theme { action: None }));
    }
}
