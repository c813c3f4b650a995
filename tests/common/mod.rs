// SPDX-License-Identifier: MPL-2.0
//! In-memory collaborators shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use map_capture::application::port::{
    Acknowledgement, GeocodeResolver, RenderSurface, SubmissionClient,
};
use map_capture::capture::SnapshotCapturer;
use map_capture::domain::error::{CaptureError, GeocodeError, SubmissionError};
use map_capture::domain::geo::{Coordinate, LocationQuery, TileStyle, ViewportState, ZoomLevel};
use map_capture::domain::snapshot::{CapturedImage, RasterFrame, ScaleFactor};
use map_capture::viewport::MapViewport;
use map_capture::workflow::WorkflowController;

pub fn coordinate(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate::new(latitude, longitude).expect("valid coordinate")
}

/// London at zoom 13, satellite.
pub fn initial_view() -> ViewportState {
    ViewportState::new(coordinate(51.505, -0.09), ZoomLevel::new(13), TileStyle::Satellite)
}

/// Paints a gradient of the presented view; no settle signal.
#[derive(Default)]
pub struct FakeSurface {
    presented: Mutex<Vec<ViewportState>>,
    broken: AtomicBool,
}

impl FakeSurface {
    pub fn presented(&self) -> Vec<ViewportState> {
        self.presented.lock().unwrap().clone()
    }

    /// Makes every later rasterization fail.
    pub fn break_pixels(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl RenderSurface for FakeSurface {
    fn size(&self) -> (u32, u32) {
        (16, 8)
    }

    fn is_attached(&self) -> bool {
        !self.presented.lock().unwrap().is_empty()
    }

    fn present(&self, viewport: &ViewportState) {
        self.presented.lock().unwrap().push(*viewport);
    }

    async fn rasterize(&self, scale: ScaleFactor) -> Result<RasterFrame, CaptureError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(CaptureError::CaptureFailure("tainted tile".into()));
        }
        let (width, height) = (scale.apply(16), scale.apply(8));
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 8) as u8, (y * 16) as u8, 90, 255]);
            }
        }
        Ok(RasterFrame::from_rgba(width, height, pixels).expect("gradient frame"))
    }
}

/// Geocoder with canned answers per query text.
#[derive(Default)]
pub struct FakeGeocoder {
    answers: Mutex<Vec<(String, Result<Coordinate, GeocodeError>)>>,
    asked: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub fn answer(&self, query: &str, result: Result<Coordinate, GeocodeError>) {
        self.answers
            .lock()
            .unwrap()
            .push((query.to_string(), result));
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeocodeResolver for FakeGeocoder {
    async fn resolve(&self, query: &LocationQuery) -> Result<Coordinate, GeocodeError> {
        self.asked.lock().unwrap().push(query.as_str().to_string());
        self.answers
            .lock()
            .unwrap()
            .iter()
            .find(|(text, _)| text == query.as_str())
            .map(|(_, result)| result.clone())
            .unwrap_or(Err(GeocodeError::NotFound))
    }
}

/// Backend answering from a queue; accepts once the queue is empty.
#[derive(Default)]
pub struct FakeBackend {
    replies: Mutex<VecDeque<Result<Acknowledgement, SubmissionError>>>,
    received: Mutex<Vec<(CapturedImage, String)>>,
}

impl FakeBackend {
    pub fn reply(&self, reply: Result<Acknowledgement, SubmissionError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn received(&self) -> Vec<(CapturedImage, String)> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionClient for FakeBackend {
    async fn submit(
        &self,
        image: &CapturedImage,
        location: &str,
    ) -> Result<Acknowledgement, SubmissionError> {
        self.received
            .lock()
            .unwrap()
            .push((image.clone(), location.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Acknowledgement { status: 200 }))
    }
}

pub struct Harness {
    pub controller: WorkflowController,
    pub surface: Arc<FakeSurface>,
    pub geocoder: Arc<FakeGeocoder>,
    pub backend: Arc<FakeBackend>,
}

pub fn harness() -> Harness {
    let surface = Arc::new(FakeSurface::default());
    let geocoder = Arc::new(FakeGeocoder::default());
    let backend = Arc::new(FakeBackend::default());

    let viewport = MapViewport::new(surface.clone(), initial_view());
    let controller = WorkflowController::new(
        viewport,
        geocoder.clone(),
        SnapshotCapturer::default(),
        backend.clone(),
    );

    Harness {
        controller,
        surface,
        geocoder,
        backend,
    }
}
