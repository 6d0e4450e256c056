use criterion::{Criterion, black_box, criterion_group, criterion_main};

use voxface_grid::VoxelGrid;
use voxface_mesh::{MeshBuilder, build_parallel, build_serial};

/// Rolling terrain: columns of height 1..=h/2 plus a floating checker layer.
fn terrain(w: usize, h: usize, d: usize) -> VoxelGrid {
    let mut g = VoxelGrid::new(w, h, d).unwrap();
    for z in 0..d {
        for x in 0..w {
            let top = 1 + (x * 7 + z * 13) % (h / 2).max(1);
            for y in 0..top {
                let _ = g.set(x as i32, y as i32, z as i32, 1 + (y % 3) as u8);
            }
            if (x + z) % 2 == 0 {
                let _ = g.set(x as i32, (h - 2) as i32, z as i32, 4);
            }
        }
    }
    g
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_build");
    for &(w, h, d) in &[(16, 16, 16), (32, 64, 32)] {
        let g = terrain(w, h, d);
        group.bench_function(format!("serial_{w}x{h}x{d}"), |b| {
            b.iter(|| black_box(build_serial(black_box(&g))))
        });
        group.bench_function(format!("parallel_{w}x{h}x{d}"), |b| {
            b.iter(|| black_box(build_parallel(black_box(&g))))
        });
        group.bench_function(format!("count_{w}x{h}x{d}"), |b| {
            b.iter(|| black_box(MeshBuilder::count_visible_faces(black_box(&g))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
