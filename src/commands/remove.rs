//! Remove command handler.

use crate::args::RemoveArgs;
use crate::commands::{open_ledger, Access, Out};
use crate::model::Expense;
use crate::{Config, Result};

/// Deletes the expenses at the given positions and saves the file.
///
/// Positions refer to the list as it was before the call, so `remove 0 1` deletes the two most
/// recently added expenses. Nothing is deleted if any position is out of range.
///
/// # Errors
///
/// - Returns an error of type `ErrorType::Index` if a position is out of range.
/// - Returns an error of type `ErrorType::Parse` if the file has lines that could not be read,
///   unless `args.force()` is set.
/// - Returns an error of type `ErrorType::Io` if the file cannot be read or saved.
pub fn remove(config: &Config, args: &RemoveArgs) -> Result<Out<Vec<Expense>>> {
    let mut ledger = open_ledger(config, Access::write(args.force()))?;
    let mutation = ledger.remove_many(args.indices())?;
    mutation.saved?;
    let removed = mutation.value;
    let message = format!(
        "Deleted {}, {} left",
        super::expenses(removed.len()),
        ledger.store().len()
    );
    Ok(Out::new(message, removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::test::TestEnv;

    const DATA: &str = "date,category,amount,description\n\
                        2024-01-01,A,1.00,\n\
                        2024-01-02,B,2.00,\n\
                        2024-01-03,C,3.00,\n";

    fn config(env: &TestEnv) -> Config {
        let data_file = env.data_file();
        Config::load(None, Some(data_file.as_path())).unwrap()
    }

    #[test]
    fn test_remove() {
        let env = TestEnv::new();
        env.write_data(DATA);
        let out = remove(&config(&env), &RemoveArgs::new(vec![2, 0])).unwrap();
        assert_eq!(out.message(), "Deleted 2 expenses, 1 left");
        let removed: Vec<&str> = out
            .structure()
            .unwrap()
            .iter()
            .map(Expense::category)
            .collect();
        assert_eq!(removed, vec!["A", "C"]);
        assert_eq!(
            env.read_data(),
            "date,category,amount,description\n2024-01-02,B,2.00,\n"
        );
    }

    #[test]
    fn test_remove_with_bad_line() {
        let env = TestEnv::new();
        env.write_data(
            "date,category,amount,description\n\
             2024-01-01,A,1.00,\n\
             2024-01-02,B,oops,\n\
             2024-01-03,C,3.00,\n",
        );
        let data_file = env.data_file();
        let config = Config::load(None, Some(data_file.as_path()))
            .unwrap()
            .with_load_policy(crate::codec::LoadPolicy::Skip);

        let err = remove(&config, &RemoveArgs::new(vec![0])).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Parse);
        assert!(err.to_string().contains("line 3"));

        let out = remove(&config, &RemoveArgs::new(vec![0]).with_force(true)).unwrap();
        assert_eq!(out.message(), "Deleted 1 expense, 1 left");
        assert_eq!(
            env.read_data(),
            "date,category,amount,description\n2024-01-03,C,3.00,\n"
        );
    }

    #[test]
    fn test_remove_out_of_range() {
        let env = TestEnv::new();
        env.write_data(DATA);
        let err = remove(&config(&env), &RemoveArgs::new(vec![1, 3])).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Index);
        assert_eq!(env.read_data(), DATA);
    }
}
