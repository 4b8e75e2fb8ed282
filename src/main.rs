//! Command line front end of the DOGS palette graph colorers

#![warn(missing_debug_implementations)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]

#[macro_use]
extern crate clap;

use std::collections::BTreeMap;

use clap::{App, ArgMatches};
use log::error;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

use dogs_palette::algorithm::{Algorithm, AlgorithmStats, run_all};
use dogs_palette::error::Result;
use dogs_palette::search::genetic::GeneticParams;
use dogs_palette::stopping::{NeverStoppingCriterion, StoppingCriterion, TimeStoppingCriterion};
use dogs_palette::util::{export_json, parse_arg, read_graph};


/**
reads an instance, colors it with the selected algorithm(s), prints a summary and
exports the colorings and statistics.
*/
pub fn main() {
    env_logger::init();
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(main_args:&ArgMatches) -> Result<()> {
    let inst_filename = main_args.value_of("instance").unwrap_or_default();
    let instance_type = main_args.value_of("type").unwrap_or("json");
    println!("reading instance: {}...", inst_filename);
    let graph = read_graph(inst_filename, instance_type)?;
    // genetic parameters
    let default_params = GeneticParams::default();
    let params = GeneticParams::new(
        parse_arg(main_args, "population")?.unwrap_or(default_params.population_size),
        parse_arg(main_args, "generations")?.unwrap_or(default_params.generations),
    );
    let mut rng = match parse_arg::<u64>(main_args, "seed")? {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let stopping_criterion:Box<dyn StoppingCriterion> = match parse_arg::<f32>(main_args, "time")? {
        Some(t) => {
            println!("time limit: {}", t);
            Box::new(TimeStoppingCriterion::new(t))
        },
        None => Box::new(NeverStoppingCriterion),
    };
    // solve it
    let results = match main_args.value_of("algorithm").unwrap_or("all") {
        "all" => run_all(&graph, params, &mut rng, stopping_criterion.as_ref())?,
        name => {
            let algorithm:Algorithm = name.parse()?;
            vec![(algorithm, algorithm.run(&graph, params, &mut rng, stopping_criterion.as_ref())?)]
        }
    };
    let mut stats = Vec::with_capacity(results.len());
    for (algorithm, res) in &results {
        let conflicts = if algorithm.may_conflict() { format!(", conflicts: {}", res.nb_conflicts()) } else { String::new() };
        println!(
            "{} took {:.3} seconds. Nb colors: {}, steps: {}{}",
            algorithm, res.execution_time.as_secs_f32(), res.chromatic_number, res.steps, conflicts
        );
        stats.push(AlgorithmStats::new(*algorithm, res));
    }
    // export results
    let solutions:BTreeMap<String, _> = results.iter()
        .map(|(algorithm, res)| (algorithm.to_string(), res))
        .collect();
    export_json(main_args.value_of("solution"), &solutions)?;
    export_json(main_args.value_of("perf"), &json!({
        "inst_name": inst_filename,
        "genetic_params": params,
        "stats": stats,
    }))?;
    Ok(())
}
