use autoggle_core::{
    clip::ClipAuthor,
    scene::{ComponentTag, NodeId, SceneGraph},
    selector::{select_targets, AddressingMode},
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Balanced rig: `width` children per level, `depth` levels, every third node rendered.
fn build_rig(width: usize, depth: usize) -> (SceneGraph, NodeId) {
    let mut g = SceneGraph::new();
    let root = g.add_root("Rig");
    let armature = g.add_child(root, "Armature").unwrap();
    let mut frontier = vec![armature];
    let mut counter = 0usize;
    for _ in 0..depth {
        let mut next = Vec::with_capacity(frontier.len() * width);
        for parent in frontier {
            for i in 0..width {
                let child = g.add_child(parent, format!("Bone_{i}")).unwrap();
                counter += 1;
                match counter % 3 {
                    0 => g.attach(child, ComponentTag::VisualRenderer),
                    1 => g.attach(child, ComponentTag::DynamicBone),
                    _ => g.attach(child, ComponentTag::EditorOnlyMarker),
                }
                next.push(child);
            }
        }
        frontier = next;
    }
    (g, root)
}

fn bench_selection(c: &mut Criterion) {
    let (graph, root) = build_rig(4, 5);
    c.bench_function("select_targets_per_node_1365", |b| {
        b.iter(|| {
            let targets =
                select_targets(black_box(&graph), root, AddressingMode::PerNodeActive).unwrap();
            black_box(targets.len())
        })
    });

    let targets = select_targets(&graph, root, AddressingMode::PerNodeActive).unwrap();
    let author = ClipAuthor::new();
    c.bench_function("author_clips_per_node_1365", |b| {
        b.iter(|| black_box(author.author_new(black_box(&targets))))
    });
}

criterion_group!(benches, bench_selection);
criterion_main!(benches);
