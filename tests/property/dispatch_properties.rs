//! Properties of option decoding and route selection

use cmdrouter::{CmdOption, CommandRouter, Param, ValueType};
use proptest::prelude::*;

fn router() -> CommandRouter<String> {
    let mut router = CommandRouter::new();
    router
        .register_option(
            CmdOption::new("page", "p")
                .unwrap()
                .value_type(ValueType::Int)
                .default_value(1)
                .unwrap(),
        )
        .unwrap();
    router
        .register_option(CmdOption::new("flag", "f").unwrap())
        .unwrap();
    router
        .register_option(
            CmdOption::new("name", "n")
                .unwrap()
                .value_type(ValueType::Str),
        )
        .unwrap();
    router
        .command("run")
        .options(["page", "flag", "name"])
        .param(Param::new("first", ValueType::Str))
        .param(Param::optional("second", "none"))
        .register(|inv| Ok(serde_json::to_string(inv)?))
        .unwrap();
    router
        .command("run/fast")
        .options(["flag"])
        .param(Param::optional("first", ""))
        .register(|inv| Ok(serde_json::to_string(inv)?))
        .unwrap();
    router
}

proptest! {
    /// Flag groups may be placed anywhere between positionals without changing the result.
    #[test]
    fn test_option_placement_is_irrelevant(
        page in 0i64..1000,
        name in "[a-z]{1,6}",
        use_long in any::<bool>(),
        order in Just(vec![0usize, 1, 2, 3, 4]).prop_shuffle(),
    ) {
        let router = router();
        let groups = if use_long {
            vec![format!("--page {}", page), "--flag".to_string(), format!("--name {}", name)]
        } else {
            vec![format!("-p {}", page), "-f".to_string(), format!("-n {}", name)]
        };
        // Items 3 and 4 are the positionals; their relative order is kept.
        let positionals = ["alpha", "beta"];
        let mut next_positional = positionals.iter();
        let mut parts = vec!["run".to_string()];
        for &idx in &order {
            match idx {
                0..=2 => parts.push(groups[idx].clone()),
                _ => parts.push(next_positional.next().unwrap().to_string()),
            }
        }

        let expected = router
            .execute(&format!("run --page {} --flag --name {} alpha beta", page, name))
            .unwrap();
        prop_assert_eq!(router.execute(&parts.join(" ")).unwrap(), expected);
    }

    /// Whenever the second token is `fast`, the two-segment route is chosen.
    #[test]
    fn test_longest_route_selected(arg in "[a-z]{1,6}", flag in any::<bool>()) {
        let router = router();
        let line = if flag {
            format!("run fast {} -f", arg)
        } else {
            format!("run fast {}", arg)
        };
        let resolved = router.resolve(&line).unwrap();
        prop_assert_eq!(resolved.command.route(), "run/fast");
        prop_assert_eq!(resolved.invocation.flag("flag"), flag);
    }
}
