use cloudprep::{normalize_seeded, NormalizeParams, PointCloud};

fn main() {
    // A lopsided helix: 3000 points far from the origin
    let cloud: PointCloud = (0..3000)
        .map(|i| {
            let t = i as f32 * 0.01;
            [40.0 + 3.0 * t.cos(), -12.0 + 3.0 * t.sin(), 5.0 + 0.2 * t]
        })
        .collect();
    let aabb = cloud.aabb();
    println!("Original cloud: {} points", cloud.len());
    println!("Bounding box: min={:?}, max={:?}", aabb.min, aabb.max);

    let params = NormalizeParams::default();
    match normalize_seeded(&cloud, &params, 42) {
        Ok(out) => {
            println!("Normalized cloud: {} points", out.len());
            println!("Removed centroid {:?}, scale {:.3}", out.centroid, out.scale);
            if let Some((lo, hi)) = out.cloud.aabb().value_range() {
                println!("Coordinate range: [{lo:.3}, {hi:.3}]");
            }
        }
        Err(e) => eprintln!("normalization failed: {e}"),
    }
}
