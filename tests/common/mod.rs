use std::fs::File;
use std::io::Error;
use std::path::{Path, PathBuf};

pub fn catalog_fixture() -> PathBuf {
    PathBuf::from("tests/fixtures/catalog.json")
}

/// Writes a commands CSV with one `add` per entry of `products`.
pub fn generate_adds(path: &Path, products: &[&str]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["action", "product", "index", "quantity"])?;
    for product in products {
        wtr.write_record(["add", product, "", ""])?;
    }

    wtr.flush()?;
    Ok(())
}
