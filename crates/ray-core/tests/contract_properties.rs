#![allow(missing_docs, clippy::unwrap_used)]

use proptest::prelude::*;
use ray_core::{ArgContract, ArgumentSpec, Command, DeeplinkQuery, Error};

fn command_from(required: &[bool]) -> Command {
    Command {
        name: "cmd".to_string(),
        mode: "view".to_string(),
        arguments: required
            .iter()
            .enumerate()
            .map(|(index, required)| ArgumentSpec {
                name: format!("arg{index}"),
                required: *required,
                ..ArgumentSpec::default()
            })
            .collect(),
        ..Command::default()
    }
}

proptest! {
    #[test]
    fn count_is_accepted_exactly_within_bounds(
        required in prop::collection::vec(any::<bool>(), 0..6),
        count in 0usize..10,
    ) {
        let command = command_from(&required);
        let contract = ArgContract::derive(&command);
        let n = required.iter().filter(|r| **r).count();
        let m = required.len();

        prop_assert_eq!(contract.min, n);
        prop_assert_eq!(contract.max, m);

        let result = contract.check(count);
        if count < n || count > m {
            let is_count_error = matches!(result, Err(Error::ArgumentCount { .. }));
            prop_assert!(is_count_error);
        } else {
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn well_ordered_commands_map_every_supplied_value(
        required_count in 0usize..4,
        optional_count in 0usize..4,
        extra in 0usize..4,
    ) {
        let mut required = vec![true; required_count];
        required.extend(std::iter::repeat_n(false, optional_count));
        let command = command_from(&required);

        let supplied = required_count + extra.min(optional_count);
        let values: Vec<String> = (0..supplied).map(|i| format!("v{i}")).collect();

        let query = DeeplinkQuery::build(&command, &values).unwrap();
        prop_assert_eq!(query.arguments.len(), supplied);
        for (index, value) in values.iter().enumerate() {
            prop_assert_eq!(query.arguments.get(&format!("arg{index}")), Some(value));
        }
    }
}
