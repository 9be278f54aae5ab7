use std::io::Write;
use std::path::Path;

use super::Point;
use crate::error::Result;

/// A named polyline: a budget line, an indifference curve, a demand curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

impl Series {
    pub fn new(name: impl Into<String>, points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            name: name.into(),
            points: points.into_iter().collect(),
        }
    }
}

/// A single labelled point, e.g. an optimal bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub point: Point,
}

impl Marker {
    pub fn new(name: impl Into<String>, point: Point) -> Self {
        Self {
            name: name.into(),
            point,
        }
    }
}

/// Everything a renderer needs to draw a chart; no drawing happens here.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    /// Upper bounds of the x and y axes; both start at zero.
    pub range: (f64, f64),
    pub series: Vec<Series>,
    pub markers: Vec<Marker>,
}

impl Figure {
    pub fn new(
        title: impl Into<String>,
        x_title: impl Into<String>,
        y_title: impl Into<String>,
        range: (f64, f64),
    ) -> Self {
        Self {
            title: title.into(),
            x_title: x_title.into(),
            y_title: y_title.into(),
            range,
            series: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn push_series(&mut self, series: Series) {
        self.series.push(series);
    }

    pub fn push_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn marker_named(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.name == name)
    }

    /// Write every series point and marker as `kind,name,x,y` rows.
    /// Returns the number of data rows written.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["kind", "name", "x", "y"])?;
        let mut count = 0;
        for series in &self.series {
            for p in &series.points {
                wtr.write_record([
                    "series",
                    series.name.as_str(),
                    &p.x.to_string(),
                    &p.y.to_string(),
                ])?;
                count += 1;
            }
        }
        for marker in &self.markers {
            wtr.write_record([
                "marker",
                marker.name.as_str(),
                &marker.point.x.to_string(),
                &marker.point.y.to_string(),
            ])?;
            count += 1;
        }
        wtr.flush()?;
        Ok(count)
    }

    pub fn save_csv(&self, path: &Path) -> Result<usize> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}
