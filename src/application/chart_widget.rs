// Chart widget - mounts the poller and orientation observer and renders their state
use crate::application::orientation_observer::{ObserverHandle, OrientationObserver};
use crate::application::poller::{PollerHandle, TelemetryPoller};
use crate::application::viewport::ViewportService;
use crate::domain::chart::{ChartStyle, ChartView, render};
use crate::domain::orientation::Orientation;
use crate::domain::series::SampleSeries;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct ChartWidget {
    poller: TelemetryPoller,
    style: ChartStyle,
}

impl ChartWidget {
    pub fn new(poller: TelemetryPoller, style: ChartStyle) -> Self {
        Self { poller, style }
    }

    /// Start polling and observing `viewport`. Everything acquired here is
    /// released by `MountedWidget::unmount` or when the widget is dropped.
    pub fn mount(self, viewport: Arc<dyn ViewportService>) -> MountedWidget {
        let style = Arc::new(self.style);
        let observer = OrientationObserver::start(viewport.as_ref());
        let poller = self.poller.start();

        let initial = render(
            &style,
            observer.current(),
            viewport.dimensions(),
            &poller.latest(),
        );
        let (view_tx, view_rx) = watch::channel(initial);

        let mut series_rx = poller.subscribe();
        let mut orientation_rx = observer.subscribe();
        let render_style = style.clone();
        let render_viewport = viewport.clone();

        let render_task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = series_rx.changed() => if changed.is_err() { break },
                    changed = orientation_rx.changed() => if changed.is_err() { break },
                }

                let series = series_rx.borrow_and_update().clone();
                let orientation = *orientation_rx.borrow_and_update();
                view_tx.send_replace(render(
                    &render_style,
                    orientation,
                    render_viewport.dimensions(),
                    &series,
                ));
            }
        });

        tracing::info!("Chart widget mounted");

        MountedWidget {
            poller,
            observer,
            viewport,
            style,
            render_task,
            views: view_rx,
        }
    }
}

pub struct MountedWidget {
    poller: PollerHandle,
    observer: ObserverHandle,
    viewport: Arc<dyn ViewportService>,
    style: Arc<ChartStyle>,
    render_task: JoinHandle<()>,
    views: watch::Receiver<ChartView>,
}

impl MountedWidget {
    /// Render from the current state on demand.
    pub fn render(&self) -> ChartView {
        render(
            &self.style,
            self.observer.current(),
            self.viewport.dimensions(),
            &self.poller.latest(),
        )
    }

    /// Views produced each time the series or orientation is republished.
    pub fn views(&self) -> watch::Receiver<ChartView> {
        self.views.clone()
    }

    pub fn series(&self) -> SampleSeries {
        self.poller.latest()
    }

    pub fn orientation(&self) -> Orientation {
        self.observer.current()
    }

    /// Cancel polling, release the viewport subscription and stop rendering.
    pub fn unmount(&self) {
        self.poller.stop();
        self.observer.stop();
        self.render_task.abort();
    }
}

impl Drop for MountedWidget {
    fn drop(&mut self) {
        self.unmount();
    }
}
