//! Catalog validation command.

use std::path::Path;

use tienda_storefront::catalog::Catalog;

use super::CommandError;

/// Load a catalog exactly as the storefront would and list its products.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any entry is invalid.
pub fn check(path: &Path) -> Result<(), CommandError> {
    let catalog = Catalog::load(path)?;

    #[allow(clippy::print_stdout)]
    {
        for product in catalog.products() {
            println!("{:<24} {:>12}  {}", product.id, product.unit_price, product.name);
        }
        println!("{} products OK", catalog.len());
    }

    Ok(())
}
