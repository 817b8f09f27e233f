use crate::world::World;

/// World inspector for debugging
pub struct WorldInspector;

impl WorldInspector {
    /// Snapshot the world's counters.
    pub fn summary(world: &World) -> WorldSummary {
        let stats = world.query_cache_stats();
        WorldSummary {
            entities: world.entity_count(),
            component_types: world.component_type_count(),
            cached_views: stats.cached_views,
            cached_entities: stats.cached_entities,
            pending_diffs: stats.pending_diffs,
            pending_recycle: world.pending_recycle_count(),
        }
    }

    /// Print world summary to console
    pub fn print_summary(world: &World) {
        let summary = Self::summary(world);
        println!("=== World Summary ===");
        println!("Entities: {}", summary.entities);
        println!("Component types: {}", summary.component_types);
        println!(
            "Views: {} cached ({} entities, {} pending diffs)",
            summary.cached_views, summary.cached_entities, summary.pending_diffs
        );
        println!("Pending recycle: {}", summary.pending_recycle);

        println!("\n=== Component stores ===");
        for (name, count) in world.component_counts() {
            println!("{name}: {count} entities");
        }
    }
}

/// Counter snapshot for debugging
#[derive(Clone, Copy, Debug)]
pub struct WorldSummary {
    /// Live entities, null sentinel excluded
    pub entities: usize,
    /// Registered component types, `Active` included
    pub component_types: usize,
    /// Distinct masks with a materialized view
    pub cached_views: usize,
    /// Total entities across all views
    pub cached_entities: usize,
    /// Queued membership diffs not yet folded in
    pub pending_diffs: usize,
    /// Destroyed ids waiting for the next collect pass
    pub pending_recycle: usize,
}
