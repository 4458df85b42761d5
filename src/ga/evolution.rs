//! Generational elitist GA over selection vectors.

use super::config::GaConfig;
use super::operators::mutate;
use crate::error::MmkpError;
use crate::model::{DataSet, Solution};
use crate::repair::Toolkit;
use crate::search::streams::map_members;
use crate::search::{
    best_of, check_instance, initial_population, offer, PopulationSearch, SearchConfig,
};
use rand::Rng;

/// Genetic Algorithm for the MMKP.
///
/// Each generation breeds `offspring` children: two parents are selected,
/// crossed over with probability `crossover_rate`, mutated and repaired.
/// Parents and children are then merged and the best `population_size`
/// chromosomes under the competitive order survive, so the weakest members
/// are the ones displaced by better offspring.
pub struct Ga<'a> {
    toolkit: Toolkit<'a>,
    config: GaConfig,
    population: Vec<Solution>,
    best: Option<Solution>,
    evaluations: usize,
}

impl<'a> Ga<'a> {
    /// Creates a GA over `data`.
    pub fn new(data: &'a DataSet, config: GaConfig) -> Result<Self, MmkpError> {
        config.validate()?;
        check_instance(data)?;
        Ok(Self {
            toolkit: Toolkit::new(data).with_strategy(config.search.repair),
            config,
            population: Vec::new(),
            best: None,
            evaluations: 0,
        })
    }

    /// Creates a GA with [`GaConfig::default`].
    pub fn with_defaults(data: &'a DataSet) -> Result<Self, MmkpError> {
        Self::new(data, GaConfig::default())
    }

    /// The GA configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    fn breed<R: Rng>(&self, rng: &mut R) -> Vec<Solution> {
        let data = self.toolkit.data();
        let toolkit = &self.toolkit;
        let population = &self.population;
        let config = &self.config;

        map_members(rng, config.offspring(), config.search.parallel, |_, r| {
            let first = &population[config.selection.select(population, r)];
            let second = &population[config.selection.select(population, r)];
            let mut child = if r.random_bool(config.crossover_rate) {
                let genes = config
                    .crossover
                    .apply(first.selection(), second.selection(), r);
                Solution::from_valid_selection(data, genes)
            } else {
                first.clone()
            };
            mutate(data, &mut child, config.mutation_rate, r);
            let _ = toolkit.repair(&mut child, r);
            child
        })
    }
}

impl PopulationSearch for Ga<'_> {
    fn name(&self) -> &'static str {
        "ga"
    }

    fn search_config(&self) -> &SearchConfig {
        &self.config.search
    }

    fn initialize<R: Rng>(&mut self, rng: &mut R) -> Result<(), MmkpError> {
        let search = &self.config.search;
        self.population = initial_population(
            &self.toolkit,
            &search.init,
            search.population_size,
            search.parallel,
            rng,
        )?;
        self.evaluations = self.population.len();
        self.best = best_of(&self.population).cloned();
        Ok(())
    }

    fn step<R: Rng>(&mut self, rng: &mut R) {
        let offspring = self.breed(rng);
        self.evaluations += offspring.len();
        for child in &offspring {
            offer(&mut self.best, child);
        }

        let size = self.population.len();
        self.population.extend(offspring);
        self.population.sort_by(|a, b| b.compare(a));
        self.population.truncate(size);
    }

    fn current_best(&self) -> Option<&Solution> {
        self.best.as_ref()
    }

    fn population(&self) -> &[Solution] {
        &self.population
    }

    fn evaluations(&self) -> usize {
        self.evaluations
    }
}
