//! Generational loop shared by the optimizers.

use super::types::PopulationSearch;
use crate::error::MmkpError;
use crate::model::{DataSet, Solution};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Result of an optimization run. Serializable with the `serde` feature.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchResult {
    /// Best solution found (competitive order: feasible first, then profit).
    pub best: Solution,

    /// Profit of `best`.
    pub best_profit: f64,

    /// Whether `best` satisfies every capacity.
    pub feasible: bool,

    /// Generations executed.
    pub generations: usize,

    /// Candidate evaluations performed, initial population included.
    pub evaluations: usize,

    /// Whether the run stopped on the stagnation limit.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best feasible profit after initialization and after each
    /// generation; 0 until a feasible solution is known. Never decreases.
    /// A final [`polish`](Self::polish) is not recorded here.
    pub profit_history: Vec<f64>,

    /// Generation in which `best` was found (0 = initial population).
    pub convergence_generation: usize,
}

impl SearchResult {
    /// Applies best-gain swap local search to `best` and refreshes
    /// `best_profit`. Returns the number of swaps applied; infeasible
    /// results are left as they are.
    pub fn polish(&mut self, data: &DataSet) -> usize {
        let swaps = crate::repair::improve(data, &mut self.best);
        if swaps > 0 {
            debug!(swaps, best_profit = self.best.profit(), "result polished");
        }
        self.best_profit = self.best.profit();
        self.feasible = self.best.is_feasible();
        swaps
    }
}

/// Drives any [`PopulationSearch`] to completion.
pub struct SearchRunner;

impl SearchRunner {
    /// Runs the search until the generation budget or the stagnation limit
    /// is reached.
    pub fn run<S: PopulationSearch>(search: &mut S) -> Result<SearchResult, MmkpError> {
        Self::run_with_cancel(search, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// If `cancel` is set to `true`, the run stops before the next
    /// generation and returns the best solution found so far.
    pub fn run_with_cancel<S: PopulationSearch>(
        search: &mut S,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult, MmkpError> {
        let config = search.search_config().clone();
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        debug!(
            algorithm = search.name(),
            population = config.population_size,
            generations = config.max_generations,
            seed,
            "search started"
        );

        search.initialize(&mut rng)?;

        let mut profit_history = Vec::with_capacity(config.max_generations + 1);
        profit_history.push(recorded_profit(search.current_best()));
        let mut incumbent = search.current_best().cloned();
        let mut convergence_generation = 0;
        let mut stagnation_counter = 0usize;
        let mut generations = 0;
        let mut stagnated = false;
        let mut cancelled = false;

        for gen in 1..=config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            search.step(&mut rng);
            generations = gen;

            let improved = match (search.current_best(), &incumbent) {
                (Some(best), Some(old)) => best.is_better_than(old),
                (Some(_), None) => true,
                (None, _) => false,
            };
            if improved {
                incumbent = search.current_best().cloned();
                convergence_generation = gen;
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            let recorded = recorded_profit(search.current_best());
            profit_history.push(recorded);
            trace!(generation = gen, best_profit = recorded, "generation finished");

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        let best = search
            .current_best()
            .cloned()
            .ok_or_else(|| MmkpError::InvalidConfig("search produced no solution".into()))?;

        debug!(
            algorithm = search.name(),
            best_profit = best.profit(),
            feasible = best.is_feasible(),
            generations,
            evaluations = search.evaluations(),
            "search finished"
        );
        if !best.is_feasible() {
            warn!(
                algorithm = search.name(),
                "no feasible solution found; the instance may be infeasible"
            );
        }

        Ok(SearchResult {
            best_profit: best.profit(),
            feasible: best.is_feasible(),
            best,
            generations,
            evaluations: search.evaluations(),
            stagnated,
            cancelled,
            profit_history,
            convergence_generation,
        })
    }
}

fn recorded_profit(best: Option<&Solution>) -> f64 {
    match best {
        Some(sol) if sol.is_feasible() => sol.profit(),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataSet;
    use crate::search::{offer, SearchConfig};
    use rand::Rng;

    // Replays a fixed sequence of selections, one per generation.
    struct Scripted {
        config: SearchConfig,
        data: DataSet,
        script: Vec<Vec<usize>>,
        cursor: usize,
        population: Vec<Solution>,
        best: Option<Solution>,
    }

    impl Scripted {
        fn new(config: SearchConfig, script: Vec<Vec<usize>>) -> Self {
            let data = DataSet::from_items(
                vec![
                    vec![(1.0, vec![1.0]), (5.0, vec![4.0]), (9.0, vec![9.0])],
                    vec![(2.0, vec![1.0]), (4.0, vec![3.0])],
                ],
                vec![8.0],
            )
            .unwrap();
            Self {
                config,
                data,
                script,
                cursor: 0,
                population: Vec::new(),
                best: None,
            }
        }

        fn next(&mut self) -> Solution {
            let i = self.cursor.min(self.script.len() - 1);
            self.cursor += 1;
            Solution::from_selection(&self.data, self.script[i].clone()).unwrap()
        }
    }

    impl PopulationSearch for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn search_config(&self) -> &SearchConfig {
            &self.config
        }

        fn initialize<R: Rng>(&mut self, _rng: &mut R) -> Result<(), MmkpError> {
            let sol = self.next();
            offer(&mut self.best, &sol);
            self.population = vec![sol];
            Ok(())
        }

        fn step<R: Rng>(&mut self, _rng: &mut R) {
            let sol = self.next();
            offer(&mut self.best, &sol);
            self.population = vec![sol];
        }

        fn current_best(&self) -> Option<&Solution> {
            self.best.as_ref()
        }

        fn population(&self) -> &[Solution] {
            &self.population
        }

        fn evaluations(&self) -> usize {
            self.cursor
        }
    }

    fn config() -> SearchConfig {
        SearchConfig::default().with_max_generations(4).with_seed(1)
    }

    #[test]
    fn test_history_tracks_best_feasible() {
        // infeasible 13, feasible 7, feasible 5, feasible 9, infeasible 11
        let script = vec![vec![2, 1], vec![1, 0], vec![0, 1], vec![1, 1], vec![2, 0]];
        let mut search = Scripted::new(config(), script);
        let result = SearchRunner::run(&mut search).unwrap();

        assert_eq!(result.profit_history, vec![0.0, 7.0, 7.0, 9.0, 9.0]);
        assert_eq!(result.best.selection(), &[1, 1]);
        assert!(result.feasible);
        assert_eq!(result.best_profit, 9.0);
        assert_eq!(result.generations, 4);
        assert_eq!(result.evaluations, 5);
        assert_eq!(result.convergence_generation, 3);
        assert!(!result.stagnated);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_stagnation_stops_early() {
        let script = vec![vec![1, 1]];
        let mut search = Scripted::new(
            config().with_max_generations(50).with_stagnation_limit(3),
            script,
        );
        let result = SearchRunner::run(&mut search).unwrap();
        assert!(result.stagnated);
        assert_eq!(result.generations, 3);
        assert_eq!(result.profit_history.len(), 4);
    }

    #[test]
    fn test_cancelled_before_first_generation() {
        let flag = Arc::new(AtomicBool::new(true));
        let mut search = Scripted::new(config(), vec![vec![1, 0]]);
        let result = SearchRunner::run_with_cancel(&mut search, Some(flag)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.profit_history, vec![7.0]);
    }

    #[test]
    fn test_invalid_config_aborts() {
        let mut search = Scripted::new(config().with_population_size(0), vec![vec![0, 0]]);
        assert!(SearchRunner::run(&mut search).is_err());
        assert!(search.current_best().is_none());
    }

    #[test]
    fn test_polish_applies_profitable_swaps() {
        // feasible 3 at usage 2; 5 then 9 fit, 13 does not
        let mut search = Scripted::new(config(), vec![vec![0, 0]]);
        let mut result = SearchRunner::run(&mut search).unwrap();
        assert_eq!(result.best_profit, 3.0);

        assert_eq!(result.polish(&search.data), 2);
        assert_eq!(result.best.selection(), &[1, 1]);
        assert_eq!(result.best_profit, 9.0);
        assert!(result.feasible);
        assert_eq!(result.profit_history, vec![3.0; 5]);
        assert_eq!(result.polish(&search.data), 0);
    }

    #[test]
    fn test_polish_skips_infeasible() {
        let mut search = Scripted::new(config(), vec![vec![2, 1]]);
        let mut result = SearchRunner::run(&mut search).unwrap();
        assert_eq!(result.polish(&search.data), 0);
        assert_eq!(result.best.selection(), &[2, 1]);
        assert!(!result.feasible);
    }

    #[test]
    fn test_never_feasible() {
        let mut search = Scripted::new(config(), vec![vec![2, 1]]);
        let result = SearchRunner::run(&mut search).unwrap();
        assert!(!result.feasible);
        assert!(result.profit_history.iter().all(|&p| p == 0.0));
    }
}
