//! Choropleth maps of population by ISO code
//!
//! Regions are keyed by their ISO Alpha-3 code and painted over the bundled
//! country outlines on a Mercator projection, shaded on the Plasma scale.
//! Codes without an outline (regional aggregates) are counted under the map.

use std::any::Any;
use std::collections::BTreeMap;
use std::time::Duration;
use ahash::{AHashMap, AHashSet};
use egui::{Color32, Mesh, Pos2, Rect, Rounding, Sense, Shape, Stroke, Ui, Vec2};
use wp_core::columns::POPULATION;
use wp_core::FilterState;
use wp_data::metrics::format_population;
use wp_data::{DataError, PopulationFrames, PopulationTable};

use super::utils::{chart_header, normalize, scale_color, show_notice, waiting_for_data};
use super::world_map::{MapProjection, WorldMap};
use crate::spec::{
    value_range, AnimatedChoroplethSpec, ChoroplethFrame, ChoroplethSpec, ColorScale, Notice, Region,
    ViewOutput,
};
use crate::{SpaceView, SpaceViewId, ViewerContext};

const LEGEND_HEIGHT: f32 = 14.0;

/// Regions of `table` in row order, one per ISO code (first row wins)
fn regions_of(table: &PopulationTable, rows: impl Iterator<Item = usize>) -> Vec<Region> {
    let mut seen: AHashSet<&str> = AHashSet::new();
    rows.filter_map(|row| {
        let iso_code = table.iso_code(row)?;
        seen.insert(iso_code).then(|| Region {
            iso_code: iso_code.to_string(),
            country: table.country(row).to_string(),
            population: table.population(row),
        })
    })
    .collect()
}

/// Population map of the selected year
pub fn build_choropleth(
    frames: &PopulationFrames,
    filter: &FilterState,
) -> Result<ViewOutput<ChoroplethSpec>, DataError> {
    let year = filter.selected_year;
    let rows = frames.countries_no_world().where_year(year)?;
    let regions = regions_of(&rows, 0..rows.num_rows());

    if regions.is_empty() {
        return Ok(ViewOutput::Notice(Notice::warning(format!(
            "Nenhum dado para exibir no mapa do ano de {}.",
            year
        ))));
    }

    Ok(ViewOutput::Chart(ChoroplethSpec {
        title: format!("População Mundial - {}", year),
        value_label: POPULATION.to_string(),
        color_scale: ColorScale::Plasma,
        value_range: value_range(regions.iter().map(|r| r.population)),
        regions,
    }))
}

/// Population map with one frame per year
///
/// All frames share the color range of the whole table so shades are
/// comparable across years.
pub fn build_animated_choropleth(
    frames: &PopulationFrames,
) -> Result<ViewOutput<AnimatedChoroplethSpec>, DataError> {
    let table = frames.countries_no_world();
    if table.is_empty() {
        return Ok(ViewOutput::Notice(Notice::warning(
            "Não há dados disponíveis para gerar o mapa animado.",
        )));
    }

    let mut rows_by_year: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for row in 0..table.num_rows() {
        rows_by_year.entry(table.year(row)).or_default().push(row);
    }

    let animation_frames: Vec<ChoroplethFrame> = rows_by_year
        .into_iter()
        .map(|(year, rows)| ChoroplethFrame {
            year,
            regions: regions_of(table, rows.into_iter()),
        })
        .collect();

    let value_range = value_range(
        animation_frames
            .iter()
            .flat_map(|frame| frame.regions.iter().map(|r| r.population)),
    );

    tracing::debug!("Animated map with {} frames", animation_frames.len());

    Ok(ViewOutput::Chart(AnimatedChoroplethSpec {
        title: "Evolução da População Mundial".to_string(),
        value_label: POPULATION.to_string(),
        color_scale: ColorScale::Plasma,
        value_range,
        frames: animation_frames,
    }))
}

/// Paint every outline, filled by population, plus hover and legend
fn region_map(ui: &mut Ui, regions: &[Region], scale: ColorScale, range: (f64, f64)) {
    let Some(world) = WorldMap::bundled() else {
        ui.colored_label(ui.visuals().error_fg_color, "Contornos dos países indisponíveis.");
        return;
    };

    let by_code: AHashMap<&str, &Region> = regions.iter().map(|r| (r.iso_code.as_str(), r)).collect();

    let height = (ui.available_height() - 3.0 * LEGEND_HEIGHT).max(120.0);
    let (area, response) = ui.allocate_exact_size(Vec2::new(ui.available_width(), height), Sense::hover());
    let projection = MapProjection::fit(area);
    let painter = ui.painter_at(area);

    let no_data = ui.visuals().faint_bg_color;
    let outline = Stroke::new(0.5, ui.visuals().widgets.noninteractive.bg_stroke.color);

    let mut mesh = Mesh::default();
    for country in world.countries() {
        let fill = match by_code.get(country.iso_code.as_str()) {
            Some(region) => scale_color(scale, normalize(region.population, range)),
            None => no_data,
        };
        for triangle in &country.triangles {
            let first = mesh.vertices.len() as u32;
            for coord in triangle {
                mesh.colored_vertex(projection.project_coord(*coord), fill);
            }
            mesh.add_triangle(first, first + 1, first + 2);
        }
    }
    painter.add(Shape::mesh(mesh));

    for country in world.countries() {
        for polygon in country.shape.iter() {
            let points: Vec<Pos2> = polygon.exterior().coords().map(|c| projection.project_coord(*c)).collect();
            painter.add(Shape::closed_line(points, outline));
        }
    }

    let hovered = response
        .hover_pos()
        .and_then(|pos| projection.unproject(pos))
        .and_then(|(lon, lat)| world.country_at(lon, lat));
    if let Some(country) = hovered {
        for polygon in country.shape.iter() {
            let points: Vec<Pos2> = polygon.exterior().coords().map(|c| projection.project_coord(*c)).collect();
            painter.add(Shape::closed_line(points, Stroke::new(2.0, Color32::WHITE)));
        }
        let text = match by_code.get(country.iso_code.as_str()) {
            Some(region) => format!(
                "{} ({})\n{}: {}",
                region.country,
                region.iso_code,
                POPULATION,
                format_population(region.population)
            ),
            None => format!("{} ({})\nSem dados", country.name, country.iso_code),
        };
        response.on_hover_text(text);
    }

    let missing = world.missing_count(regions.iter().map(|r| r.iso_code.as_str()));
    color_legend(ui, scale, range);
    if missing > 0 {
        ui.small(format!("{} códigos sem geometria", missing))
            .on_hover_text("Agregados regionais e códigos sem contorno não aparecem no mapa.");
    }
}

/// Horizontal gradient with the range end labels
fn color_legend(ui: &mut Ui, scale: ColorScale, range: (f64, f64)) {
    const STEPS: usize = 48;

    ui.add_space(4.0);
    let width = ui.available_width().min(360.0);
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, LEGEND_HEIGHT), Sense::hover());
    let painter = ui.painter_at(rect);
    let slice = width / STEPS as f32;
    for i in 0..STEPS {
        let min = Pos2::new(rect.left() + i as f32 * slice, rect.top());
        let color = scale_color(scale, i as f32 / (STEPS - 1) as f32);
        painter.rect_filled(Rect::from_min_size(min, Vec2::new(slice + 0.5, rect.height())), Rounding::ZERO, color);
    }

    ui.horizontal(|ui| {
        ui.small(format_population(range.0));
        ui.add_space((width - 160.0).max(8.0));
        ui.small(format_population(range.1));
    });
}

/// Single-year choropleth view
pub struct ChoroplethView {
    id: SpaceViewId,
    title: String,
}

impl ChoroplethView {
    pub fn new(id: SpaceViewId) -> Self {
        Self {
            id,
            title: "Mapa".to_string(),
        }
    }
}

impl SpaceView for ChoroplethView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "ChoroplethView"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        let Some(model) = ctx.model() else {
            waiting_for_data(ui);
            return;
        };

        match &model.map {
            ViewOutput::Chart(spec) => {
                chart_header(ui, &spec.title, spec);
                region_map(ui, &spec.regions, spec.color_scale, spec.value_range);
            }
            ViewOutput::Notice(notice) => show_notice(ui, notice),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Animated choropleth view with playback controls
pub struct AnimatedChoroplethView {
    id: SpaceViewId,
    title: String,
}

impl AnimatedChoroplethView {
    pub fn new(id: SpaceViewId) -> Self {
        Self {
            id,
            title: "Mapa animado".to_string(),
        }
    }

    fn controls(&self, ctx: &ViewerContext, ui: &mut Ui, spec: &AnimatedChoroplethSpec) {
        let frame_count = spec.frames.len();
        let mut time = ctx.time_control.write();
        time.clamp(frame_count);

        ui.horizontal(|ui| {
            if ui.button("⏮").on_hover_text("Ano anterior").clicked() {
                time.playing = false;
                time.step_back();
            }
            let play_label = if time.playing { "⏸" } else { "▶" };
            if ui.button(play_label).clicked() {
                time.playing = !time.playing;
            }
            if ui.button("⏭").on_hover_text("Próximo ano").clicked() {
                time.playing = false;
                time.step_forward(frame_count);
            }
            ui.checkbox(&mut time.looping, "Repetir");

            if frame_count > 1 {
                let mut index = time.frame_index;
                let slider = egui::Slider::new(&mut index, 0..=frame_count - 1)
                    .show_value(false);
                if ui.add(slider).changed() {
                    time.playing = false;
                    time.frame_index = index;
                }
            }
            if let Some(frame) = spec.frames.get(time.frame_index) {
                ui.strong(frame.year.to_string());
            }
        });
    }
}

impl SpaceView for AnimatedChoroplethView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "AnimatedChoroplethView"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        let Some(model) = ctx.model() else {
            waiting_for_data(ui);
            return;
        };

        match &model.animated_map {
            ViewOutput::Chart(spec) => {
                chart_header(ui, &spec.title, spec);
                self.controls(ctx, ui, spec);

                let index = ctx.time_control.read().frame_index;
                if let Some(frame) = spec.frames.get(index) {
                    region_map(ui, &frame.regions, spec.color_scale, spec.value_range);
                }
                if ctx.time_control.read().playing {
                    ui.ctx().request_repaint();
                }
            }
            ViewOutput::Notice(notice) => show_notice(ui, notice),
        }
    }

    fn on_frame_update(&mut self, ctx: &ViewerContext, dt: Duration) {
        let Some(model) = ctx.model() else {
            return;
        };
        if let Some(spec) = model.animated_map.chart() {
            ctx.time_control
                .write()
                .advance(dt, spec.frames.len(), ctx.config.animation.frame_interval);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
