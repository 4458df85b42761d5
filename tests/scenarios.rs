//! End-to-end runs of the three optimizers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_mmkp::abc::{Abc, AbcConfig, AbcRunner};
use u_mmkp::ga::{Ga, GaConfig, GaRunner};
use u_mmkp::model::{DataSet, Solution};
use u_mmkp::repair::improve;
use u_mmkp::search::{InitStrategy, PopulationSearch, SearchResult, SearchRunner};
use u_mmkp::tlbo::{Tlbo, TlboConfig, TlboRunner};
use u_mmkp::MmkpError;

fn small_instance() -> DataSet {
    DataSet::from_items(
        vec![
            vec![(6.0, vec![3.0, 2.0]), (9.0, vec![5.0, 4.0])],
            vec![(4.0, vec![2.0, 2.0]), (8.0, vec![4.0, 3.0]), (11.0, vec![6.0, 6.0])],
            vec![(5.0, vec![2.0, 3.0]), (7.0, vec![3.0, 4.0])],
        ],
        vec![10.0, 10.0],
    )
    .unwrap()
}

/// Seeded instance with a single-item class at index 2 and a
/// zero-consumption item in class 0.
fn generated_instance() -> DataSet {
    let mut rng = StdRng::seed_from_u64(2024);
    let dims = 3;
    let mut classes: Vec<Vec<(f64, Vec<f64>)>> = (0..12)
        .map(|_| {
            (0..5)
                .map(|_| {
                    let costs: Vec<f64> = (0..dims)
                        .map(|_| f64::from(rng.random_range(1u32..20)))
                        .collect();
                    let profit = costs.iter().sum::<f64>() + f64::from(rng.random_range(0u32..15));
                    (profit, costs)
                })
                .collect()
        })
        .collect();
    classes[2] = vec![(10.0, vec![5.0, 5.0, 5.0])];
    classes[0].push((1.0, vec![0.0; dims]));
    DataSet::from_items(classes, vec![110.0, 110.0, 110.0]).unwrap()
}

/// Lightest item per class, then best-gain feasible single swaps until
/// none improves profit.
fn greedy_swap_baseline(data: &DataSet) -> Solution {
    let lightest = (0..data.class_count())
        .map(|c| {
            (0..data.items_in(c))
                .min_by(|&a, &b| {
                    data.item(c, a)
                        .aggregate_use()
                        .total_cmp(&data.item(c, b).aggregate_use())
                })
                .unwrap()
        })
        .collect();
    let mut sol = Solution::from_selection(data, lightest).unwrap();
    assert!(sol.is_feasible());

    loop {
        let mut best: Option<Solution> = None;
        for c in 0..data.class_count() {
            for i in 0..data.items_in(c) {
                let mut next = sol.clone();
                next.select(data, c, i).unwrap();
                let gain = next.profit() > best.as_ref().unwrap_or(&sol).profit();
                if next.is_feasible() && gain {
                    best = Some(next);
                }
            }
        }
        match best {
            Some(next) => sol = next,
            None => return sol,
        }
    }
}

fn assert_monotone(result: &SearchResult) {
    assert!(
        result.profit_history.windows(2).all(|w| w[1] >= w[0]),
        "history decreased: {:?}",
        result.profit_history
    );
}

#[test]
fn test_ga_beats_greedy_swap_baseline() {
    let data = small_instance();
    let baseline = greedy_swap_baseline(&data);

    let config = GaConfig::default()
        .with_population_size(20)
        .with_max_generations(50)
        .with_seed(42);
    let result = GaRunner::run(&data, &config).unwrap();

    assert!(result.feasible);
    assert!(result.best_profit >= baseline.profit());
    // [0, 1, 1] is the feasible optimum
    assert_eq!(result.best_profit, 21.0);
    assert_monotone(&result);
}

#[test]
fn test_all_optimizers_monotone_and_feasible() {
    let data = generated_instance();
    let abc = AbcRunner::run(
        &data,
        &AbcConfig::default().with_max_generations(30).with_seed(11),
    )
    .unwrap();
    let tlbo = TlboRunner::run(
        &data,
        &TlboConfig::default()
            .with_max_generations(30)
            .with_classroom_size(10)
            .with_seed(11),
    )
    .unwrap();
    let ga = GaRunner::run(
        &data,
        &GaConfig::default().with_max_generations(30).with_seed(11),
    )
    .unwrap();

    for result in [&abc, &tlbo, &ga] {
        assert!(result.feasible);
        assert_monotone(result);
        assert_eq!(result.profit_history.len(), 31);
        assert_eq!(*result.profit_history.last().unwrap(), result.best_profit);
        assert!(result.convergence_generation <= result.generations);
    }
}

#[test]
fn test_polish_leaves_no_improving_swap() {
    let data = generated_instance();
    let runs: [(fn(bool) -> Result<SearchResult, MmkpError>, &str); 3] = [
        (
            |polish| {
                let config = AbcConfig::default().with_max_generations(3).with_seed(8);
                AbcRunner::run(&generated_instance(), &config.with_polish(polish))
            },
            "abc",
        ),
        (
            |polish| {
                let config = TlboConfig::default().with_max_generations(3).with_seed(8);
                TlboRunner::run(&generated_instance(), &config.with_polish(polish))
            },
            "tlbo",
        ),
        (
            |polish| {
                let config = GaConfig::default().with_max_generations(3).with_seed(8);
                GaRunner::run(&generated_instance(), &config.with_polish(polish))
            },
            "ga",
        ),
    ];

    for (run, name) in runs {
        let plain = run(false).unwrap();
        let polished = run(true).unwrap();
        assert!(polished.feasible, "{name}");
        assert!(polished.best_profit >= plain.best_profit, "{name}");
        assert_eq!(polished.profit_history, plain.profit_history, "{name}");
        assert_eq!(polished.best_profit, polished.best.profit(), "{name}");
        assert_eq!(improve(&data, &mut polished.best.clone()), 0, "{name}");
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    let data = generated_instance();
    let config = TlboConfig::default()
        .with_max_generations(15)
        .with_random_teacher(true)
        .with_seed(5);
    let a = TlboRunner::run(&data, &config).unwrap();
    let b = TlboRunner::run(&data, &config).unwrap();
    assert_eq!(a.profit_history, b.profit_history);
    assert_eq!(a.best, b.best);
    assert_eq!(a.evaluations, b.evaluations);
}

#[test]
fn test_single_item_class_is_fixed() {
    let data = generated_instance();

    let mut abc =
        Abc::new(&data, AbcConfig::default().with_max_generations(10).with_seed(1)).unwrap();
    SearchRunner::run(&mut abc).unwrap();
    let mut tlbo =
        Tlbo::new(&data, TlboConfig::default().with_max_generations(10).with_seed(1)).unwrap();
    SearchRunner::run(&mut tlbo).unwrap();
    let mut ga = Ga::new(
        &data,
        GaConfig::default()
            .with_max_generations(10)
            .with_mutation_rate(1.0)
            .with_seed(1),
    )
    .unwrap();
    SearchRunner::run(&mut ga).unwrap();

    for population in [abc.population(), tlbo.population(), ga.population()] {
        assert!(population.iter().all(|s| s.selected(2) == 0));
    }
}

#[test]
fn test_unsolvable_instance_reports_infeasible() {
    let data = DataSet::from_items(
        vec![
            vec![(5.0, vec![6.0]), (3.0, vec![7.0])],
            vec![(4.0, vec![5.0])],
        ],
        vec![10.0],
    )
    .unwrap();
    let result = GaRunner::run(
        &data,
        &GaConfig::default().with_max_generations(5).with_seed(3),
    )
    .unwrap();
    assert!(!result.feasible);
    assert!(result.profit_history.iter().all(|&p| p == 0.0));
}

#[test]
fn test_given_population_is_validated() {
    let data = small_instance();
    let bad = AbcConfig::default()
        .with_seed(1)
        .with_init(InitStrategy::Given(vec![vec![0, 5, 0]]));
    assert!(matches!(
        AbcRunner::run(&data, &bad),
        Err(MmkpError::ItemOutOfRange { class: 1, .. })
    ));

    let good = AbcConfig::default()
        .with_seed(1)
        .with_max_generations(5)
        .with_init(InitStrategy::Given(vec![vec![0, 1, 1]]));
    let result = AbcRunner::run(&data, &good).unwrap();
    assert_eq!(result.best_profit, 21.0);
    assert_eq!(result.convergence_generation, 0);
}
