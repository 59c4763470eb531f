use lloyd_kmeans::*;
use rand::prelude::*;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let (sample_cnt, sample_dims, k, max_iter) = (20000, 20, 8, 2500);

    // Generate some random data
    let mut rnd = StdRng::seed_from_u64(1);
    let mut samples = vec![0.0f64;sample_cnt * sample_dims];
    samples.iter_mut().for_each(|v| *v = rnd.gen_range(0.0, 1.0));
    let data = Dataset::new(samples, sample_cnt, sample_dims)?;

    let conf: KMeansConfig<f64> = KMeansConfig::build()
        .max_iter(max_iter)
        .seed(7)
        .init_done(&|_| println!("Initialization completed."))
        .iteration_done(&|s, nr, new_distsum|
            println!("Iteration {} - WCSS: {:.2} -> {:.2} | Improvement: {:.2}",
                nr, s.distsum, new_distsum, s.distsum - new_distsum))
        .build();

    let mut kmean = KMeans::new(k, conf)?;
    kmean.fit(&data)?;

    let state = kmean.state()?;
    println!("Converged: {} after {} iterations", state.converged, state.iterations);
    println!("Cluster sizes: {:?}", state.centroid_frequency);
    println!("WCSS: {}", state.distsum);
    Ok(())
}
