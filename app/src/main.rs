use std::future::Future;
use std::time::Instant;

use biomegen::{
    BiomeType, DetailLevel, GeneratorConfig, Heightmap, HeightmapGenerator, PointCountPolicy,
    RegionSet,
    utils::{biome_map, shaded_preview, to_rgb_bytes},
};
use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{ColorImage, TextureHandle};
use log::{error, info};
use storage::HeightmapStore;
use storage::models::HeightmapDoc;

const MONGO_URI: &str = "mongodb://localhost:27017";
const DB_NAME: &str = "terrain_db";
const COLLECTION: &str = "heightmaps";

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum ViewMode {
    #[default]
    Grayscale,
    Shaded,
    Biomes,
}

struct TerrainApp {
    // parameters
    width: u32,
    height: u32,
    seed: u64,
    detail: DetailLevel,
    point_count: PointCountPolicy,
    enrich: bool,
    steps: u32,
    multiplier: f64,
    lower_floor: bool,
    map_name: String,

    view: ViewMode,
    terrain_texture: Option<TextureHandle>,

    // last run; regions are absent for maps loaded from the DB
    last_config: Option<GeneratorConfig>,
    last_heightmap: Option<Heightmap>,
    last_regions: Option<RegionSet>,
    last_region_count: u32,

    status_message: String,
}

impl Default for TerrainApp {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            seed: 2025,
            detail: DetailLevel::High,
            point_count: PointCountPolicy::Detail,
            enrich: true,
            steps: 3,
            multiplier: 10.0,
            lower_floor: false,
            map_name: "untitled".into(),
            view: ViewMode::Grayscale,
            terrain_texture: None,
            last_config: None,
            last_heightmap: None,
            last_regions: None,
            last_region_count: 0,
            status_message: String::new(),
        }
    }
}

impl TerrainApp {
    fn config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new(self.width, self.height, self.seed)
            .with_detail(self.detail)
            .with_point_count(self.point_count);
        config.raster.enrich = self.enrich;
        config.raster.steps = self.steps;
        config.raster.multiplier = self.multiplier;
        config.raster.lower_floor = self.lower_floor;
        config
    }

    fn generate(&mut self, ctx: &egui::Context) {
        let start = Instant::now();
        let config = self.config();
        let result = HeightmapGenerator::new(config.clone()).and_then(|g| g.generate());
        match result {
            Ok(generation) => {
                let ms = start.elapsed().as_secs_f32() * 1000.0;
                let counts = generation.regions.count_by_biome();
                let summary = BiomeType::ALL
                    .iter()
                    .filter_map(|b| counts.get(b).map(|n| format!("{} {n}", b.name())))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.status_message = format!(
                    "Generated in {ms:.2} ms (seed {}): {} regions [{summary}]",
                    self.seed,
                    generation.regions.len()
                );
                self.last_region_count = generation.regions.len() as u32;
                self.last_config = Some(config);
                self.last_heightmap = Some(generation.heightmap);
                self.last_regions = Some(generation.regions);
                self.refresh_texture(ctx);
            }
            Err(e) => {
                error!("generation failed: {e}");
                self.status_message = format!("Generation failed: {e}");
            }
        }
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let Some(hm) = &self.last_heightmap else {
            self.terrain_texture = None;
            return;
        };
        let size = [hm.width() as usize, hm.height() as usize];
        let rgb = match (self.view, &self.last_regions) {
            (ViewMode::Grayscale, _) => to_rgb_bytes(hm),
            (ViewMode::Shaded, _) => shaded_preview(hm).into_raw(),
            (ViewMode::Biomes, Some(regions)) => biome_map(regions).into_raw(),
            (ViewMode::Biomes, None) => {
                self.status_message = "No biome layout for a map loaded from DB".into();
                to_rgb_bytes(hm)
            }
        };
        let color_image = ColorImage::from_rgb(size, &rgb);
        self.terrain_texture =
            Some(ctx.load_texture("terrain", color_image, egui::TextureOptions::NEAREST));
        ctx.request_repaint();
    }

    fn save_png(&mut self) {
        let Some(hm) = &self.last_heightmap else {
            self.status_message = "Nothing to save yet".into();
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name(format!("heightmap_{}.png", self.seed))
            .save_file()
        else {
            return;
        };
        self.status_message = match hm.save_png(&path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => format!("Save failed: {e}"),
        };
    }

    fn save_to_db(&mut self) {
        let (Some(config), Some(hm)) = (&self.last_config, &self.last_heightmap) else {
            self.status_message = "Generate a map first".into();
            return;
        };
        if config.seed > i64::MAX as u64 {
            self.status_message = "Seed too large to store".into();
            return;
        }
        let doc = HeightmapDoc::from_heightmap(&self.map_name, config, hm, self.last_region_count);

        self.status_message = match block_on_store(|store| async move { store.create(doc).await })
        {
            Ok(()) => {
                info!("saved heightmap {:?} to MongoDB", self.map_name);
                "Saved to MongoDB".into()
            }
            Err(e) => format!("DB error: {e}"),
        };
    }

    fn load_from_db(&mut self, ctx: &egui::Context) {
        let seed = self.seed as i64;
        let found =
            match block_on_store(|store| async move { store.read_by_seed(seed).await }) {
                Ok(found) => found,
                Err(e) => {
                    self.status_message = format!("DB error: {e}");
                    return;
                }
            };
        let Some(doc) = found else {
            self.status_message = "No entry for this seed".into();
            return;
        };
        let Some(hm) = doc.to_heightmap() else {
            self.status_message = format!("Stored map {:?} is corrupt", doc.name);
            return;
        };

        self.map_name = doc.name.clone();
        self.last_region_count = doc.region_count;
        self.last_config = Some(doc.config);
        self.last_heightmap = Some(hm);
        self.last_regions = None;
        self.status_message = format!("Loaded {:?} from MongoDB", doc.name);
        self.refresh_texture(ctx);
    }
}

// Open the store on a throwaway current-thread runtime and run one operation
fn block_on_store<T, E, F, Fut>(op: F) -> Result<T, String>
where
    E: std::fmt::Display,
    F: FnOnce(HeightmapStore) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("runtime error: {e}"))?;
    rt.block_on(async {
        let store = HeightmapStore::init(MONGO_URI, DB_NAME, COLLECTION)
            .await
            .map_err(|e| format!("init: {e}"))?;
        op(store).await.map_err(|e| e.to_string())
    })
}

impl App for TerrainApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Biome Heightmap Generator");
            ui.separator();

            ui.label("Width");
            ui.add(egui::Slider::new(&mut self.width, 64..=1024).step_by(16.0));
            ui.label("Height");
            ui.add(egui::Slider::new(&mut self.height, 64..=1024).step_by(16.0));

            ui.label("Seed");
            ui.add(egui::DragValue::new(&mut self.seed).speed(1.0));

            ui.label("Point count");
            egui::ComboBox::from_id_salt("point_count")
                .selected_text(format!("{:?}", self.point_count))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.point_count, PointCountPolicy::Detail, "Detail");
                    ui.selectable_value(
                        &mut self.point_count,
                        PointCountPolicy::HalfWidth,
                        "HalfWidth",
                    );
                });
            ui.add_enabled_ui(self.point_count == PointCountPolicy::Detail, |ui| {
                egui::ComboBox::from_label("Detail")
                    .selected_text(format!("{:?}", self.detail))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.detail, DetailLevel::Low, "Low");
                        ui.selectable_value(&mut self.detail, DetailLevel::Medium, "Medium");
                        ui.selectable_value(&mut self.detail, DetailLevel::High, "High");
                    });
            });

            ui.separator();
            ui.checkbox(&mut self.enrich, "Noise enrichment");
            if self.enrich {
                ui.label("Steps");
                ui.add(egui::Slider::new(&mut self.steps, 1..=6));
                ui.label("Multiplier");
                ui.add(egui::Slider::new(&mut self.multiplier, 1.0..=20.0));
            }
            ui.checkbox(&mut self.lower_floor, "Lower floor to zero");

            ui.separator();
            let prev_view = self.view;
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.view, ViewMode::Grayscale, "Grayscale");
                ui.selectable_value(&mut self.view, ViewMode::Shaded, "Shaded");
                ui.selectable_value(&mut self.view, ViewMode::Biomes, "Biomes");
            });
            if prev_view != self.view {
                self.refresh_texture(ctx);
            }

            ui.separator();
            if ui.button("Generate Heightmap").clicked() {
                self.generate(ctx);
            }
            if ui.button("Save PNG…").clicked() {
                self.save_png();
            }

            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut self.map_name);
            });
            if ui.button("Save to DB…").clicked() {
                self.save_to_db();
            }
            if ui.button("Load from DB…").clicked() {
                self.load_from_db(ctx);
            }

            ui.separator();
            ui.label(&self.status_message);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(tex) = &self.terrain_texture {
                // fit the whole map, keeping its aspect ratio
                let available = ui.available_size();
                let [w, h] = tex.size().map(|v| v.max(1) as f32);
                let scale = (available.x / w).min(available.y / h);
                ui.image((tex.id(), egui::vec2(w * scale, h * scale)));
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("Click “Generate Heightmap” to start");
                });
            }
        });
    }
}

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    run_native(
        "Biome Heightmap Generator",
        opts,
        Box::new(|_cc| Ok(Box::new(TerrainApp::default()))),
    )
}
