// Chart view model - declarative description handed to the rendering surface
use super::orientation::{Dimensions, LayoutDirection, Orientation};
use super::series::SampleSeries;
use serde::{Deserialize, Serialize};

/// Static presentation settings. None of these depend on the data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub title: String,
    pub title_font_size: f64,
    pub title_margin_bottom: f64,
    pub title_color: String,
    pub container_padding: f64,
    /// Subtracted from the viewport width to get the chart width.
    pub horizontal_inset: f64,
    pub portrait_height: f64,
    pub landscape_height: f64,
    pub y_axis_label: String,
    pub x_axis_label: String,
    pub placeholder_label: String,
    pub placeholder_value: f64,
    pub background_color: String,
    pub gradient_from: String,
    pub gradient_to: String,
    pub decimal_places: u32,
    pub stroke_rgb: Rgb,
    pub stroke_width: f64,
    pub border_radius: f64,
    pub margin_vertical: f64,
    pub bezier: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "SD Wind".to_string(),
            title_font_size: 20.0,
            title_margin_bottom: 10.0,
            title_color: "#D0D0D0".to_string(),
            container_padding: 20.0,
            horizontal_inset: 40.0,
            portrait_height: 220.0,
            landscape_height: 300.0,
            y_axis_label: "Wind".to_string(),
            x_axis_label: "Date".to_string(),
            placeholder_label: "Loading...".to_string(),
            placeholder_value: 0.0,
            background_color: "#e26a00".to_string(),
            gradient_from: "#fb8c00".to_string(),
            gradient_to: "#ffa726".to_string(),
            decimal_places: 2,
            stroke_rgb: Rgb::new(255, 255, 255),
            stroke_width: 2.0,
            border_radius: 16.0,
            margin_vertical: 8.0,
            bezier: true,
        }
    }
}

impl ChartStyle {
    pub fn height_for(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Portrait => self.portrait_height,
            Orientation::Landscape => self.landscape_height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn rgba(&self, opacity: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, opacity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub container: ContainerView,
    pub title: TitleView,
    pub chart: LineChartSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerView {
    pub padding: f64,
    pub direction: LayoutDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleView {
    pub text: String,
    pub font_size: f64,
    pub margin_bottom: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartSpec {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub width: f64,
    pub height: f64,
    pub y_axis_label: String,
    pub x_axis_label: String,
    pub config: ChartColors,
    pub bezier: bool,
    pub margin_vertical: f64,
    pub border_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub data: Vec<f64>,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartColors {
    pub background_color: String,
    pub background_gradient_from: String,
    pub background_gradient_to: String,
    pub decimal_places: u32,
    /// Stroke color at full opacity; use `Rgb::rgba` for other opacities.
    pub color: String,
    pub border_radius: f64,
}

/// Compose the current orientation, viewport and series into a chart view.
///
/// Always produces a view: an empty series renders as one placeholder label
/// over one placeholder value.
pub fn render(
    style: &ChartStyle,
    orientation: Orientation,
    viewport: Dimensions,
    series: &SampleSeries,
) -> ChartView {
    let labels = if series.labels.is_empty() {
        vec![style.placeholder_label.clone()]
    } else {
        series.labels.clone()
    };

    let data = if series.is_empty() {
        vec![style.placeholder_value]
    } else {
        series.data.clone()
    };

    ChartView {
        container: ContainerView {
            padding: style.container_padding,
            direction: orientation.layout_direction(),
        },
        title: TitleView {
            text: style.title.clone(),
            font_size: style.title_font_size,
            margin_bottom: style.title_margin_bottom,
            color: style.title_color.clone(),
        },
        chart: LineChartSpec {
            labels,
            datasets: vec![Dataset {
                data,
                stroke_width: style.stroke_width,
            }],
            width: (viewport.width - style.horizontal_inset).max(0.0),
            height: style.height_for(orientation),
            y_axis_label: style.y_axis_label.clone(),
            x_axis_label: style.x_axis_label.clone(),
            config: ChartColors {
                background_color: style.background_color.clone(),
                background_gradient_from: style.gradient_from.clone(),
                background_gradient_to: style.gradient_to.clone(),
                decimal_places: style.decimal_places,
                color: style.stroke_rgb.rgba(1.0),
                border_radius: style.border_radius,
            },
            bezier: style.bezier,
            margin_vertical: style.margin_vertical,
            border_radius: style.border_radius,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_before_first_fetch() {
        let view = render(
            &ChartStyle::default(),
            Orientation::Portrait,
            Dimensions::new(400.0, 800.0),
            &SampleSeries::default(),
        );

        assert_eq!(view.chart.labels, vec!["Loading..."]);
        assert_eq!(view.chart.datasets.len(), 1);
        assert_eq!(view.chart.datasets[0].data, vec![0.0]);
        assert_eq!(view.title.text, "SD Wind");
    }

    #[test]
    fn test_series_is_rendered_as_is() {
        let series = SampleSeries::new(
            vec![1.5, 2.0],
            vec!["10:00:00 AM".to_string(), "10:01:00 AM".to_string()],
        );
        let view = render(
            &ChartStyle::default(),
            Orientation::Portrait,
            Dimensions::new(400.0, 800.0),
            &series,
        );

        assert_eq!(view.chart.labels, series.labels);
        assert_eq!(view.chart.datasets[0].data, series.data);
        assert_eq!(view.chart.datasets[0].stroke_width, 2.0);
    }

    #[test]
    fn test_geometry_follows_orientation() {
        let style = ChartStyle::default();
        let series = SampleSeries::default();

        let portrait = render(&style, Orientation::Portrait, Dimensions::new(400.0, 800.0), &series);
        assert_eq!(portrait.chart.width, 360.0);
        assert_eq!(portrait.chart.height, 220.0);
        assert_eq!(portrait.container.direction, LayoutDirection::Column);

        let landscape = render(&style, Orientation::Landscape, Dimensions::new(800.0, 400.0), &series);
        assert_eq!(landscape.chart.width, 760.0);
        assert_eq!(landscape.chart.height, 300.0);
        assert_eq!(landscape.container.direction, LayoutDirection::Row);
    }

    #[test]
    fn test_narrow_viewport_clamps_width() {
        let view = render(
            &ChartStyle::default(),
            Orientation::Portrait,
            Dimensions::new(30.0, 60.0),
            &SampleSeries::default(),
        );
        assert_eq!(view.chart.width, 0.0);
    }

    #[test]
    fn test_static_colors() {
        let view = render(
            &ChartStyle::default(),
            Orientation::Portrait,
            Dimensions::new(400.0, 800.0),
            &SampleSeries::default(),
        );

        assert_eq!(view.chart.config.background_color, "#e26a00");
        assert_eq!(view.chart.config.background_gradient_from, "#fb8c00");
        assert_eq!(view.chart.config.background_gradient_to, "#ffa726");
        assert_eq!(view.chart.config.color, "rgba(255, 255, 255, 1)");
        assert_eq!(view.chart.config.decimal_places, 2);
        assert!(view.chart.bezier);
        assert_eq!(Rgb::new(255, 255, 255).rgba(0.2), "rgba(255, 255, 255, 0.2)");
    }
}
