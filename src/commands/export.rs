//! Export command handler.

use crate::args::ExportArgs;
use crate::commands::{open_ledger, Access, Out};
use crate::{Config, Result};

/// Writes every expense to `args.path()` with quoting where a field needs it. The expenses file
/// itself is not changed.
///
/// # Errors
///
/// - Returns an error of type `ErrorType::Io` if the expenses file cannot be read or the export
///   cannot be written.
pub fn export(config: &Config, args: &ExportArgs) -> Result<Out<()>> {
    let ledger = open_ledger(config, Access::Read)?;
    ledger.export(args.path())?;
    let message = format!(
        "Exported {} to {}",
        super::expenses(ledger.store().len()),
        args.path().display()
    );
    Ok(Out::new_message(message))
}
