use std::f64::consts::TAU;

use kepler_solver::{batch, kepler};

const STEPS: usize = 12;

fn main() {
    let eccentricities = [0.0, 0.3, 0.7, 0.95];

    println!("{:>8} {:>6} {:>12} {:>12}", "M", "e", "E", "f");

    for &eccentricity in &eccentricities {
        for i in 0..STEPS {
            let mean_anomaly = i as f64 * TAU / STEPS as f64;
            let solution = match kepler(mean_anomaly, eccentricity) {
                Ok(solution) => solution,
                Err(e) => {
                    eprintln!("skipping e={eccentricity}: {e}");
                    break;
                }
            };

            println!(
                "{mean_anomaly:>8.4} {eccentricity:>6.2} {:>12.8} {:>12.8}",
                solution.eccentric_anomaly,
                solution.true_anomaly(),
            );
        }
    }

    let mean_anomalies: Vec<f64> = (0..STEPS).map(|i| i as f64 * TAU / STEPS as f64).collect();
    let (shape, grid) = batch::solve_broadcast(
        &mean_anomalies,
        &[STEPS, 1],
        &eccentricities,
        &[eccentricities.len()],
    )
    .expect("shapes are compatible");

    println!("\nBroadcast grid of shape {shape:?}:");
    for row in grid.chunks(eccentricities.len()) {
        let row: Vec<String> = row.iter().map(|e| format!("{e:>10.6}")).collect();
        println!("{}", row.join(" "));
    }
}
