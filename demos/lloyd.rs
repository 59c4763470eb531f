use lloyd_kmeans::*;
use rand::prelude::*;

fn main() -> Result<()> {
    let (sample_cnt, sample_dims, k, max_iter) = (20000, 200, 4, 100);

    // Generate some random data
    let mut rnd = StdRng::seed_from_u64(1337);
    let mut samples = vec![0.0f64;sample_cnt * sample_dims];
    samples.iter_mut().for_each(|v| *v = rnd.gen_range(0.0, 1.0));
    let data = Dataset::new(samples, sample_cnt, sample_dims)?;

    let mut kmean = KMeans::new(k, KMeansConfig::build().max_iter(max_iter).build())?;
    kmean.fit(&data)?;

    println!("Centroids: {:?}", kmean.centroids()?);
    println!("Cluster-Assignments: {:?}", kmean.assignments()?);
    println!("WCSS: {}", kmean.compute_wcss(&data)?);
    Ok(())
}
