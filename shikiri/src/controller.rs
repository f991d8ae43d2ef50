use shikiri_ipc::{ApplyInfo, Command, Direction, LayoutMode, Response, StatusInfo};

use crate::config::Config;
use crate::core::{MonitorInfo, MonitorRegistry, WindowSnapshot};
use crate::layout;
use crate::platform::Platform;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Truncation {
    pub monitors: bool,
    pub windows: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyReport {
    pub mode: LayoutMode,
    pub placed: usize,
    pub failed: usize,
    pub truncation: Truncation,
}

impl ApplyReport {
    pub fn info(&self) -> ApplyInfo {
        ApplyInfo {
            layout: self.mode,
            placed: self.placed,
            failed: self.failed,
            monitors_truncated: self.truncation.monitors,
            windows_truncated: self.truncation.windows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshReport {
    pub monitors: usize,
    pub truncated: bool,
    /// False when enumeration failed and the previous set was kept.
    pub updated: bool,
}

/// Owns the current layout mode and monitor set, and drives a [`Platform`].
pub struct LayoutController<P> {
    platform: P,
    registry: MonitorRegistry,
    mode: LayoutMode,
    max_windows: usize,
}

impl<P: Platform> LayoutController<P> {
    pub fn new(platform: P, config: &Config) -> Self {
        let mut controller = Self {
            platform,
            registry: MonitorRegistry::new(config.max_monitors),
            mode: config.default_layout,
            max_windows: config.max_windows,
        };
        controller.refresh_monitors();
        controller
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn monitors(&self) -> &[MonitorInfo] {
        self.registry.current()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn select(&mut self, mode: LayoutMode) -> ApplyReport {
        if self.mode != mode {
            tracing::info!("Layout changed: {} -> {}", self.mode, mode);
            self.mode = mode;
        }
        self.reapply()
    }

    pub fn cycle(&mut self, direction: Direction) -> ApplyReport {
        let mode = match direction {
            Direction::Next => self.mode.next(),
            Direction::Prev => self.mode.prev(),
        };
        self.select(mode)
    }

    pub fn refresh_monitors(&mut self) -> RefreshReport {
        match self.platform.enumerate_monitors() {
            Ok(monitors) => {
                let truncated = self.registry.replace(monitors);
                tracing::info!("Monitors refreshed: {} active", self.registry.len());
                for monitor in self.registry.current() {
                    tracing::debug!("  - [{}] {:?}", monitor.id, monitor.bounds);
                }
                RefreshReport {
                    monitors: self.registry.len(),
                    truncated,
                    updated: true,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to enumerate monitors, keeping previous set: {:#}", e);
                RefreshReport {
                    monitors: self.registry.len(),
                    truncated: self.registry.is_truncated(),
                    updated: false,
                }
            }
        }
    }

    pub fn reapply(&mut self) -> ApplyReport {
        let snapshot = match self.platform.enumerate_windows() {
            Ok(windows) => WindowSnapshot::capture(windows, self.max_windows),
            Err(e) => {
                tracing::warn!("Failed to enumerate windows: {:#}", e);
                WindowSnapshot::default()
            }
        };

        let placements = layout::compute(self.mode, snapshot.windows(), self.registry.current());
        if placements.is_empty() {
            tracing::info!(
                "Nothing to tile ({} windows, {} monitors)",
                snapshot.len(),
                self.registry.len()
            );
        }

        let mut failed = 0;
        for placement in &placements {
            if let Err(e) = self.platform.apply_placement(placement) {
                tracing::warn!("Failed to place window {}: {}", placement.window, e);
                failed += 1;
            }
        }

        let report = ApplyReport {
            mode: self.mode,
            placed: placements.len() - failed,
            failed,
            truncation: Truncation {
                monitors: self.registry.is_truncated(),
                windows: snapshot.is_truncated(),
            },
        };
        tracing::info!(
            "Applied {} layout: {} placed, {} failed",
            report.mode,
            report.placed,
            report.failed
        );
        report
    }

    pub fn status(&self) -> StatusInfo {
        StatusInfo {
            layout: self.mode,
            monitors: self.registry.current().iter().map(|m| m.summary()).collect(),
            monitors_truncated: self.registry.is_truncated(),
        }
    }

    pub fn handle_command(&mut self, cmd: &Command) -> Response {
        tracing::debug!("Handling command: {:?}", cmd);
        match cmd {
            Command::SelectLayout { mode } => Response::Applied(self.select(*mode).info()),
            Command::CycleLayout { direction } => {
                Response::Applied(self.cycle(*direction).info())
            }
            Command::Reapply => Response::Applied(self.reapply().info()),
            Command::RefreshMonitors => {
                let refresh = self.refresh_monitors();
                if !refresh.updated {
                    return Response::Error {
                        message: "failed to enumerate monitors".to_string(),
                    };
                }
                Response::Applied(self.reapply().info())
            }
            Command::Status => Response::Status(self.status()),
            // Shutdown belongs to whoever owns the event loop.
            Command::Quit => Response::Ok,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Placement, Rect, WindowHandle};
    use crate::error::PlatformError;
    use anyhow::{anyhow, Result};
    use std::collections::HashSet;

    #[derive(Default)]
    struct MockPlatform {
        monitors: Vec<MonitorInfo>,
        windows: Vec<WindowHandle>,
        closed: HashSet<WindowHandle>,
        fail_monitors: bool,
        fail_windows: bool,
        applied: Vec<Placement>,
    }

    impl Platform for MockPlatform {
        fn enumerate_monitors(&mut self) -> Result<Vec<MonitorInfo>> {
            if self.fail_monitors {
                return Err(anyhow!("display server unavailable"));
            }
            Ok(self.monitors.clone())
        }

        fn enumerate_windows(&mut self) -> Result<Vec<WindowHandle>> {
            if self.fail_windows {
                return Err(anyhow!("window list unavailable"));
            }
            Ok(self.windows.clone())
        }

        fn apply_placement(&mut self, placement: &Placement) -> Result<(), PlatformError> {
            if self.closed.contains(&placement.window) {
                return Err(PlatformError::WindowGone(placement.window));
            }
            self.applied.push(*placement);
            Ok(())
        }
    }

    fn platform(monitor_count: u64, window_count: u64) -> MockPlatform {
        MockPlatform {
            monitors: (0..monitor_count)
                .map(|i| MonitorInfo::new(i, Rect::from_origin_size(i as i32 * 1920, 0, 1920, 1080)))
                .collect(),
            windows: (1..=window_count).map(WindowHandle).collect(),
            ..Default::default()
        }
    }

    fn controller(platform: MockPlatform) -> LayoutController<MockPlatform> {
        LayoutController::new(platform, &Config::default())
    }

    #[test]
    fn test_initial_state() {
        let ctl = controller(platform(2, 0));
        assert_eq!(ctl.mode(), LayoutMode::Vertical);
        assert_eq!(ctl.monitors().len(), 2);
        assert!(ctl.platform().applied.is_empty());
    }

    #[test]
    fn test_default_layout_from_config() {
        let config = Config {
            default_layout: LayoutMode::Grid,
            ..Config::default()
        };
        let ctl = LayoutController::new(platform(1, 1), &config);
        assert_eq!(ctl.mode(), LayoutMode::Grid);
    }

    #[test]
    fn test_select_applies_placements_in_order() {
        let mut ctl = controller(platform(1, 4));
        let report = ctl.select(LayoutMode::Grid);

        assert_eq!(report.mode, LayoutMode::Grid);
        assert_eq!(report.placed, 4);
        assert_eq!(report.failed, 0);
        let applied = &ctl.platform().applied;
        assert_eq!(
            applied.iter().map(|p| p.window).collect::<Vec<_>>(),
            (1..=4).map(WindowHandle).collect::<Vec<_>>()
        );
        assert_eq!(applied[3].target, Rect::new(960, 540, 1920, 1080));
    }

    #[test]
    fn test_select_same_mode_recomputes() {
        let mut ctl = controller(platform(1, 2));
        ctl.select(LayoutMode::Vertical);
        ctl.platform.windows.push(WindowHandle(3));
        let report = ctl.select(LayoutMode::Vertical);

        assert_eq!(report.placed, 3);
        assert_eq!(ctl.platform().applied.len(), 5);
    }

    #[test]
    fn test_switching_modes_retiles_same_windows() {
        let mut ctl = controller(platform(1, 4));
        ctl.select(LayoutMode::Grid);
        let grid: Vec<_> = ctl.platform.applied.drain(..).collect();
        ctl.select(LayoutMode::Vertical);
        let vertical = &ctl.platform().applied;

        let windows = |ps: &[Placement]| ps.iter().map(|p| p.window).collect::<Vec<_>>();
        assert_eq!(windows(grid.as_slice()), windows(vertical.as_slice()));
        assert_ne!(grid, *vertical);
    }

    #[test]
    fn test_cycle() {
        let mut ctl = controller(platform(1, 1));
        assert_eq!(ctl.cycle(Direction::Next).mode, LayoutMode::Horizontal);
        assert_eq!(ctl.cycle(Direction::Next).mode, LayoutMode::Grid);
        assert_eq!(ctl.cycle(Direction::Next).mode, LayoutMode::Vertical);
        assert_eq!(ctl.cycle(Direction::Prev).mode, LayoutMode::Grid);
    }

    #[test]
    fn test_sink_failure_does_not_abort_batch() {
        let mut mock = platform(1, 3);
        mock.closed.insert(WindowHandle(2));
        let mut ctl = controller(mock);

        let report = ctl.reapply();
        assert_eq!(report.placed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(
            ctl.platform()
                .applied
                .iter()
                .map(|p| p.window)
                .collect::<Vec<_>>(),
            vec![WindowHandle(1), WindowHandle(3)]
        );
    }

    #[test]
    fn test_no_monitors_is_a_no_op() {
        let mut ctl = controller(platform(0, 3));
        let report = ctl.reapply();
        assert_eq!(report.placed, 0);
        assert_eq!(report.failed, 0);
        assert!(ctl.platform().applied.is_empty());
    }

    #[test]
    fn test_window_capacity_is_reported() {
        let config = Config {
            max_windows: 2,
            ..Config::default()
        };
        let mut ctl = LayoutController::new(platform(1, 5), &config);
        let report = ctl.reapply();
        assert_eq!(report.placed, 2);
        assert!(report.truncation.windows);
        assert!(!report.truncation.monitors);
    }

    #[test]
    fn test_monitor_capacity_is_reported() {
        let config = Config {
            max_monitors: 1,
            ..Config::default()
        };
        let mut ctl = LayoutController::new(platform(3, 2), &config);
        assert_eq!(ctl.monitors().len(), 1);
        let report = ctl.reapply();
        assert!(report.truncation.monitors);
        // Both windows land on the only tracked monitor.
        assert!(ctl
            .platform()
            .applied
            .iter()
            .all(|p| ctl.monitors()[0].bounds.contains(&p.target)));
    }

    #[test]
    fn test_monitor_spanning_full_i32_range_is_skipped() {
        let mut mock = platform(1, 3);
        mock.monitors
            .insert(0, MonitorInfo::new(99, Rect::new(i32::MIN, 0, i32::MAX, 1080)));
        let mut ctl = controller(mock);

        assert_eq!(ctl.monitors().len(), 1);
        let report = ctl.reapply();
        assert_eq!(report.placed, 3);
        let bounds = ctl.monitors()[0].bounds;
        assert!(ctl
            .platform()
            .applied
            .iter()
            .all(|p| bounds.contains(&p.target)));
    }

    #[test]
    fn test_failed_monitor_refresh_keeps_previous_set() {
        let mut ctl = controller(platform(2, 0));
        ctl.platform.fail_monitors = true;
        let refresh = ctl.refresh_monitors();
        assert!(!refresh.updated);
        assert_eq!(refresh.monitors, 2);
        assert_eq!(ctl.monitors().len(), 2);
    }

    #[test]
    fn test_refresh_picks_up_new_monitors() {
        let mut ctl = controller(platform(1, 4));
        ctl.platform.monitors = platform(2, 0).monitors;
        let refresh = ctl.refresh_monitors();
        assert!(refresh.updated);
        assert_eq!(ctl.monitors().len(), 2);

        ctl.reapply();
        let second = ctl.monitors()[1].bounds;
        assert_eq!(
            ctl.platform()
                .applied
                .iter()
                .filter(|p| second.contains(&p.target))
                .count(),
            2
        );
    }

    #[test]
    fn test_failed_window_enumeration_places_nothing() {
        let mut mock = platform(1, 3);
        mock.fail_windows = true;
        let mut ctl = controller(mock);
        let report = ctl.reapply();
        assert_eq!(report.placed, 0);
        assert!(ctl.platform().applied.is_empty());
    }

    #[test]
    fn test_handle_command() {
        let mut ctl = controller(platform(2, 3));

        let response = ctl.handle_command(&Command::SelectLayout {
            mode: LayoutMode::Horizontal,
        });
        match response {
            Response::Applied(info) => {
                assert_eq!(info.layout, LayoutMode::Horizontal);
                assert_eq!(info.placed, 3);
            }
            other => panic!("unexpected response: {:?}", other),
        }

        match ctl.handle_command(&Command::Status) {
            Response::Status(status) => {
                assert_eq!(status.layout, LayoutMode::Horizontal);
                assert_eq!(status.monitors.len(), 2);
                assert!(!status.monitors_truncated);
            }
            other => panic!("unexpected response: {:?}", other),
        }

        ctl.platform.fail_monitors = true;
        assert!(matches!(
            ctl.handle_command(&Command::RefreshMonitors),
            Response::Error { .. }
        ));
        assert_eq!(ctl.handle_command(&Command::Quit), Response::Ok);
    }
}
