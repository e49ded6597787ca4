use garden_core::{CellCoord, Config, GrowthStage, Plant, SoilSample};
use garden_rendering::GardenScene;
use garden_world::{query, scaffold, World};

const CELL_EDGE: f32 = 10.0;

#[test]
fn scenes_track_the_authoritative_world_state() {
    let config = Config {
        columns: 6,
        rows: 4,
        rng_seed: 17,
        ..Config::default()
    };
    let mut world = World::new(config).expect("config is valid");
    scaffold::clear_occupants(&mut world);

    let planted = CellCoord::new(4, 1);
    assert!(scaffold::place_plant(
        &mut world,
        planted,
        Plant {
            stage: GrowthStage::Mature,
            health: 0.7,
            growth: 0.8,
            steps_in_stage: 3,
        }
    ));

    let scene = GardenScene::compose(&query::cell_view(&world), query::metrics(&world), CELL_EDGE);

    assert_eq!(scene.dimensions(), (6, 4));
    assert_eq!(scene.cells().len(), 24);
    assert!((scene.width() - 60.0).abs() < f32::EPSILON);
    assert!((scene.height() - 40.0).abs() < f32::EPSILON);

    let markers: Vec<usize> = scene
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.plant.is_some())
        .map(|(index, _)| index)
        .collect();
    let expected = planted.row() as usize * 6 + planted.column() as usize;
    assert_eq!(markers, vec![expected]);

    let metrics = scene.metrics();
    assert!((metrics.coverage - 1.0 / 24.0).abs() < 1e-6);
}

#[test]
fn soil_shading_varies_with_moisture_across_the_grid() {
    let config = Config {
        columns: 3,
        rows: 3,
        rng_seed: 29,
        ..Config::default()
    };
    let mut world = World::new(config).expect("config is valid");
    scaffold::clear_occupants(&mut world);

    let dry = SoilSample {
        moisture: 0.05,
        nutrients: 0.4,
        sunlight: 0.6,
        compaction: 0.3,
        temperature: 0.5,
    };
    let wet = SoilSample { moisture: 0.95, ..dry };
    scaffold::flatten_soil(&mut world, dry);
    assert!(scaffold::set_soil(&mut world, CellCoord::new(2, 2), wet));

    let scene = GardenScene::compose(&query::cell_view(&world), query::metrics(&world), CELL_EDGE);
    let dry_color = scene.cells()[0].soil;
    let wet_color = scene.cells()[8].soil;
    assert!(wet_color.red < dry_color.red);
}
