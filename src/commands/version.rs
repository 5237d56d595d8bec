use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("rigmon version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
