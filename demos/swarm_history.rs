use std::{error::Error, fs::File, io::BufWriter, path::Path};

use hypso::{
    core::{CtrlCAbortSignal, Minimizer},
    observers::TrackingObserver,
    solvers::particles::HybridPSO,
    test_functions::G11,
    traits::AbortSignal,
};

fn main() -> Result<(), Box<dyn Error>> {
    let tracker = TrackingObserver::build_with_particles();

    let mut m = Minimizer::new(Box::new(HybridPSO::default().with_swarm_size(30)))
        .with_seed(0)
        .with_max_steps(300)
        .with_parameter_names(["x", "y"])
        .with_abort_signal(CtrlCAbortSignal::new().boxed())
        .with_observer(tracker.clone());

    let summary = m.minimize(&G11, &mut ())?;
    println!("{}", summary);

    // Export the swarm history to a Python .pkl file to visualize via matplotlib
    let mut writer = BufWriter::new(File::create(Path::new("swarm_history.pkl"))?);
    serde_pickle::to_writer(&mut writer, &*tracker.read(), Default::default())?;
    Ok(())
}
