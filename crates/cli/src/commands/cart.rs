//! Stored cart inspection command.
//!
//! Useful when a shopper reports a cart that "disappeared": the session
//! value can be copied out of the `tower_sessions.session` table and decoded
//! here to see whether the storefront would accept it.

use std::path::Path;

use tienda_core::Price;
use tienda_storefront::cart::CartView;
use tienda_storefront::cart::store::decode_cart;

use super::CommandError;

/// Decode a stored cart document and print it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the document would be
/// discarded by the storefront.
pub fn inspect(path: &Path, shipping_fee: u64) -> Result<(), CommandError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cart = decode_cart(raw.trim())?;
    let view = CartView::new(&cart, Price::from_units(shipping_fee));

    #[allow(clippy::print_stdout)]
    {
        if view.is_empty {
            println!("Cart is empty");
            return Ok(());
        }
        for row in &view.items {
            println!(
                "{:<24} {:>4} x {:>12} = {:>12}  {}",
                row.id, row.quantity, row.unit_price, row.line_total, row.name
            );
        }
        println!("Items:    {}", view.item_count);
        println!("Subtotal: {}", view.subtotal);
        println!("Envío:    {}", view.shipping);
        println!("Total:    {}", view.total);
    }

    Ok(())
}
