//! Scenario tests for grid fire spread
//!
//! These runs pin down the step loop end to end: ignition, one-hop-per-step
//! spread, burn-out timing and termination.

use fire_grid_core::{
    parse_layout, CombustionEvent, CombustionState, ConstantSource, Environment, Fahrenheit,
    Grid, GridCoord, MilesPerHour, Percent, PropagationEngine, SimError, StepOutcome, TileType,
    WindDirection,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn environment(direction: WindDirection, speed: f32, temp: f32, humidity: f32) -> Environment {
    Environment::new(
        direction,
        MilesPerHour::new(speed),
        Fahrenheit::new(temp),
        Percent::new(humidity),
    )
    .unwrap()
}

/// 3x3 all-Soil grid, bed depth 2 everywhere, calm 70°F / 30% humidity, ignition at center
#[test]
fn test_three_by_three_soil_burns_out_completely() {
    let mut grid = Grid::uniform(3, 3, TileType::Soil, 2).unwrap();
    grid.set_ignition_tile(GridCoord::new(1, 1)).unwrap();
    let env = environment(WindDirection::West, 0.0, 70.0, 30.0);
    let mut rng = ConstantSource::always_ignite();
    let mut engine = PropagationEngine::new();

    engine.start(&mut grid, &env).unwrap();
    let center = GridCoord::new(1, 1);

    // Step 1: all 8 neighbors ignite, in neighbor order
    assert_eq!(
        engine.advance_step(&mut grid, &env, &mut rng).unwrap(),
        StepOutcome::Continuing
    );
    let step1: Vec<CombustionEvent> = engine
        .drain_events()
        .into_iter()
        .filter(|e| e.step == 1)
        .collect();
    let expected_order = [
        (1, 2),
        (1, 0),
        (2, 1),
        (0, 1),
        (2, 2),
        (2, 0),
        (0, 2),
        (0, 0),
    ];
    assert_eq!(step1.len(), 8);
    for (event, (x, y)) in step1.iter().zip(expected_order) {
        assert_eq!(event.coord, GridCoord::new(x, y));
        assert_eq!(event.state, CombustionState::Burning { steps_remaining: 4 });
    }

    // Steps 2-4: the center burns down and is burned after the 4th step
    for _ in 2..=3 {
        engine.advance_step(&mut grid, &env, &mut rng).unwrap();
        assert!(grid.tile_at(center).unwrap().is_burning());
    }
    assert_eq!(
        engine.advance_step(&mut grid, &env, &mut rng).unwrap(),
        StepOutcome::Continuing
    );
    assert!(grid.tile_at(center).unwrap().is_burned());
    assert_eq!(engine.burning_tiles().len(), 8);

    // Step 5: the ring (lit at step 1) burns out and the run ends
    assert_eq!(
        engine.advance_step(&mut grid, &env, &mut rng).unwrap(),
        StepOutcome::Finished
    );
    assert!(grid.tiles().all(|t| t.is_burned()));
    assert!(!engine.is_running());
    assert_eq!(engine.step_count(), 5);
}

#[test]
fn test_single_water_tile_cannot_start() {
    let mut grid = Grid::uniform(1, 1, TileType::Water, 0).unwrap();
    grid.set_ignition_tile(GridCoord::new(0, 0)).unwrap();
    let mut engine = PropagationEngine::new();

    let err = engine
        .start(&mut grid, &Environment::default())
        .unwrap_err();
    assert!(
        matches!(err, SimError::InvalidState { .. }),
        "expected InvalidState, got {err:?}"
    );
    assert_eq!(
        grid.tile_at(GridCoord::new(0, 0)).unwrap().state(),
        CombustionState::Unburned
    );
}

#[test]
fn test_fire_stops_at_water_and_asphalt_breaks() {
    // A full-height firebreak column splits the map
    let rows = [
        "\"\"\"~\"\"\"",
        "\"\"\"#\"\"\"",
        "\"F\"~\"\"\"",
        "\"\"\"#\"\"\"",
        "\"\"\"~\"\"\"",
    ];
    let mut layout_rng = ChaCha8Rng::seed_from_u64(1);
    let mut grid = parse_layout(&rows, &mut layout_rng).unwrap();
    let env = environment(WindDirection::East, 20.0, 100.0, 0.0);
    let mut engine = PropagationEngine::new();
    let mut rng = ConstantSource::always_ignite();

    engine.start(&mut grid, &env).unwrap();
    let outcome = engine
        .run_until_finished(&mut grid, &env, &mut rng, Some(1000))
        .unwrap();
    assert_eq!(outcome, StepOutcome::Finished);

    for tile in grid.tiles() {
        let c = tile.coord();
        match c.x {
            0..=2 => assert!(tile.is_burned(), "west side {c} should burn"),
            3 => assert_eq!(tile.state(), CombustionState::Unburned),
            _ => assert_eq!(
                tile.state(),
                CombustionState::Unburned,
                "east side {c} is behind the break"
            ),
        }
    }
}

#[test]
fn test_fire_advances_one_ring_per_step() {
    let mut grid = Grid::uniform(9, 9, TileType::Grass, 3).unwrap();
    grid.set_ignition_tile(GridCoord::new(4, 4)).unwrap();
    let env = Environment::default();
    let mut engine = PropagationEngine::new();
    let mut rng = ConstantSource::always_ignite();
    engine.start(&mut grid, &env).unwrap();

    for step in 1..=3 {
        engine.advance_step(&mut grid, &env, &mut rng).unwrap();
        for tile in grid.tiles() {
            let c = tile.coord();
            let ring = (c.x - 4).abs().max((c.y - 4).abs());
            let lit = tile.state() != CombustionState::Unburned;
            assert_eq!(lit, ring <= step, "tile {c} after step {step}");
        }
    }
}

/// With a strong east wind fire should reach the east edge well before the west edge
#[test]
fn test_wind_biases_spread_downwind() {
    let env = environment(WindDirection::East, 20.0, 70.0, 20.0);
    let mut east_first = 0;
    let trials = 40;

    for seed in 0..trials {
        let mut grid = Grid::uniform(21, 5, TileType::Grass, 3).unwrap();
        grid.set_ignition_tile(GridCoord::new(10, 2)).unwrap();
        let mut engine = PropagationEngine::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        engine.start(&mut grid, &env).unwrap();

        let mut east_step = None;
        let mut west_step = None;
        while engine.is_running() {
            engine.advance_step(&mut grid, &env, &mut rng).unwrap();
            for event in engine.drain_events() {
                if event.coord.x == 20 && east_step.is_none() {
                    east_step = Some(event.step);
                }
                if event.coord.x == 0 && west_step.is_none() {
                    west_step = Some(event.step);
                }
            }
        }

        match (east_step, west_step) {
            (Some(e), Some(w)) if e < w => east_first += 1,
            (Some(_), None) => east_first += 1,
            _ => {}
        }
    }

    println!("East edge reached first in {east_first}/{trials} runs");
    assert!(
        east_first >= trials * 3 / 4,
        "downwind edge should usually be reached first ({east_first}/{trials})"
    );
}

#[test]
fn test_random_terrain_always_terminates() {
    for seed in 0..20u64 {
        let mut layout_rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = Grid::new(15, 15, &mut layout_rng).unwrap();
        for tile_index in 0..225 {
            let coord = GridCoord::new(tile_index % 15, tile_index / 15);
            let terrain = TileType::TERRAIN[(seed as usize + tile_index as usize * 7) % 8];
            grid.assign_terrain(coord, terrain, &mut layout_rng).unwrap();
        }
        grid.assign_terrain(GridCoord::new(7, 7), TileType::Tree, &mut layout_rng)
            .unwrap();
        grid.set_ignition_tile(GridCoord::new(7, 7)).unwrap();

        let env = Environment::default();
        let mut engine = PropagationEngine::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0xF1BE);
        engine.start(&mut grid, &env).unwrap();

        // Every flammable tile burns for at most 12 steps and ignites once,
        // so the run is bounded by 225 * 12 steps
        let outcome = engine
            .run_until_finished(&mut grid, &env, &mut rng, Some(225 * 12))
            .unwrap();
        assert_eq!(outcome, StepOutcome::Finished, "seed {seed}");
        assert_eq!(engine.stats(&grid).burning, 0);
    }
}

#[test]
fn test_stop_does_not_alter_tiles() {
    let mut grid = Grid::uniform(5, 5, TileType::Shrub, 2).unwrap();
    grid.set_ignition_tile(GridCoord::new(2, 2)).unwrap();
    let env = Environment::default();
    let mut engine = PropagationEngine::new();
    let mut rng = ConstantSource::always_ignite();
    engine.start(&mut grid, &env).unwrap();
    engine.advance_step(&mut grid, &env, &mut rng).unwrap();

    let before = grid.combustion_snapshot();
    engine.stop();
    assert_eq!(grid.combustion_snapshot(), before);
    assert_eq!(
        engine.advance_step(&mut grid, &env, &mut rng).unwrap_err(),
        SimError::NotRunning
    );
    assert_eq!(grid.combustion_snapshot(), before);
}
