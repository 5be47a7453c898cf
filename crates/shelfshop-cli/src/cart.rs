//! `cart` command: drive the persisted cart badge counter.

use shelfshop_core::{AppConfig, CartStore, FileStorage};

use crate::CartCommands;

/// Apply a cart command against the file-backed cart and print the count.
///
/// Storage problems never fail the command; they are logged by the store and
/// the printed count reflects the in-memory value.
pub(crate) fn run_cart(config: &AppConfig, command: &CartCommands) {
    let cart = CartStore::open(FileStorage::new(&config.cart_path));
    let count = apply(&cart, command);
    println!("cart: {count}");
}

fn apply<S: shelfshop_core::CartStorage>(cart: &CartStore<S>, command: &CartCommands) -> u32 {
    match command {
        CartCommands::Show => cart.count(),
        CartCommands::Add => cart.increment(),
        CartCommands::Remove => cart.decrement(),
        CartCommands::Reset => cart.reset(),
    }
}
