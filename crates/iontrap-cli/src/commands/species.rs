use crate::error::Result;
use iontrap::core::species::IonSpecies;
use iontrap::engine::error::EngineError;

pub fn run() -> Result<()> {
    println!("{:<8}  {:>11}  {:>6}", "Symbol", "Mass number", "Charge");
    for symbol in IonSpecies::known_symbols() {
        let species = IonSpecies::from_symbol(symbol).map_err(EngineError::from)?;
        println!(
            "{:<8}  {:>11}  {:>+6}",
            symbol,
            species.mass_number(),
            species.charge()
        );
    }
    Ok(())
}
