//! Cart command handlers for the CLI.
//!
//! Every command bootstraps the session from the persisted cart id first,
//! then applies at most one mutation and prints the resulting cart.

use clap::Subcommand;
use tonic_core::AppConfig;
use tonic_session::{
    BootstrapOutcome, CartSession, DrawerView, FileCartIdStore, MutationOutcome,
};
use tonic_storefront::StorefrontClient;

use crate::render;

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show the current cart
    Show,
    /// Add a variant to the cart
    Add {
        /// Variant id, e.g. gid://shopify/ProductVariant/123
        variant_id: String,
        #[arg(long, default_value = "1")]
        quantity: u32,
    },
    /// Set a line's quantity (0 removes the line)
    Set { line_id: String, quantity: u32 },
    /// Increase a line's quantity by one
    Inc { line_id: String },
    /// Decrease a line's quantity by one, removing it at one
    Dec { line_id: String },
    /// Remove a line
    Remove { line_id: String },
    /// Print the hosted checkout URL
    Checkout,
}

/// Run a cart command against the session persisted at `config.session_path`.
///
/// # Errors
///
/// Returns an error when the cart mutation fails or is rejected by the
/// storefront, so scripted use sees a non-zero exit status.
pub(crate) async fn run_cart(
    client: Option<StorefrontClient>,
    config: &AppConfig,
    command: CartCommands,
) -> anyhow::Result<()> {
    let session = CartSession::new(client, FileCartIdStore::new(&config.session_path));

    match session.bootstrap().await {
        BootstrapOutcome::NotConfigured => {
            println!("{}", render::NOT_CONFIGURED);
            return Ok(());
        }
        BootstrapOutcome::Failed(message) => {
            anyhow::bail!("could not open a cart: {message}");
        }
        BootstrapOutcome::Restored | BootstrapOutcome::Created => {}
    }

    let outcome = match command {
        CartCommands::Show => None,
        CartCommands::Add {
            variant_id,
            quantity,
        } => Some(session.add_line(&variant_id, quantity).await),
        CartCommands::Set { line_id, quantity } => {
            Some(session.set_quantity(&line_id, quantity).await)
        }
        CartCommands::Inc { line_id } => Some(session.increment(&line_id).await),
        CartCommands::Dec { line_id } => Some(session.decrement(&line_id).await),
        CartCommands::Remove { line_id } => Some(session.remove_line(&line_id).await),
        CartCommands::Checkout => {
            match session.checkout_url() {
                Some(url) if session.snapshot().total_quantity() > 0 => println!("{url}"),
                _ => println!("Your cart is empty"),
            }
            return Ok(());
        }
    };

    if let Some(outcome) = outcome {
        check_outcome(outcome)?;
    }

    if let Some(view) = DrawerView::from_state(&session.snapshot(), session.is_configured()) {
        print!("{}", render::drawer(&view));
    }
    Ok(())
}

fn check_outcome(outcome: MutationOutcome) -> anyhow::Result<()> {
    match outcome {
        MutationOutcome::Applied | MutationOutcome::Discarded => Ok(()),
        MutationOutcome::Skipped => {
            println!("nothing to change: line not in cart");
            Ok(())
        }
        MutationOutcome::Rejected(errors) => {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            anyhow::bail!("cart update rejected: {}", messages.join("; "))
        }
        MutationOutcome::Failed(message) => anyhow::bail!("cart update failed: {message}"),
    }
}
