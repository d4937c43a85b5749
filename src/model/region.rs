//! Region manager - which screen region owns input focus

use crate::messages::Direction;

/// A named screen area that can hold input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    TabArea,
    CodeArea,
    FileBrowser,
    Terminal,
    GitPanel,
    HelpWindow,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::TabArea,
        Region::CodeArea,
        Region::FileBrowser,
        Region::Terminal,
        Region::GitPanel,
        Region::HelpWindow,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Display name used in status messages
    pub fn name(self) -> &'static str {
        match self {
            Region::TabArea => "Tab Area",
            Region::CodeArea => "Code Area",
            Region::FileBrowser => "File Browser",
            Region::Terminal => "Terminal",
            Region::GitPanel => "Git Panel",
            Region::HelpWindow => "Help Window",
        }
    }
}

/// Tracks the focused region, per-region enabled flags, and the tab cursor
#[derive(Debug, Clone)]
pub struct RegionManager {
    current: Region,
    enabled: [bool; Region::ALL.len()],
    tab_index: usize,
    tab_count: usize,
}

impl Default for RegionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionManager {
    /// Start in the code area; panels start disabled
    pub fn new() -> Self {
        let mut enabled = [false; Region::ALL.len()];
        enabled[Region::CodeArea.index()] = true;
        enabled[Region::HelpWindow.index()] = true;
        Self {
            current: Region::CodeArea,
            enabled,
            tab_index: 0,
            tab_count: 0,
        }
    }

    pub fn current(&self) -> Region {
        self.current
    }

    pub fn set(&mut self, region: Region) {
        if self.current != region {
            tracing::debug!("Region: {} -> {}", self.current.name(), region.name());
        }
        self.current = region;
    }

    pub fn is_enabled(&self, region: Region) -> bool {
        self.enabled[region.index()]
    }

    pub fn set_enabled(&mut self, region: Region, enabled: bool) {
        self.enabled[region.index()] = enabled;
    }

    pub fn region_name(&self) -> &'static str {
        self.current.name()
    }

    /// Topology lookup with disabled-target skip; None means no neighbour
    fn neighbour(&self, direction: Direction) -> Option<Region> {
        use Direction::*;
        use Region::*;

        let target = match (self.current, direction) {
            (TabArea, Down) => CodeArea,
            (CodeArea, Up) => TabArea,
            (CodeArea, Down) => Terminal,
            (CodeArea, Left) => FileBrowser,
            (FileBrowser, Up) => TabArea,
            (FileBrowser, Down) | (FileBrowser, Right) => CodeArea,
            (Terminal, Up) | (Terminal, Right) => CodeArea,
            (Terminal, Left) => {
                if self.is_enabled(FileBrowser) {
                    FileBrowser
                } else {
                    CodeArea
                }
            }
            _ => return None,
        };
        self.is_enabled(target).then_some(target)
    }

    /// Move focus in `direction`. Returns whether a transition occurred.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        match self.neighbour(direction) {
            Some(target) => {
                self.set(target);
                true
            }
            None => false,
        }
    }

    pub fn navigate_up(&mut self) -> bool {
        self.navigate(Direction::Up)
    }

    pub fn navigate_down(&mut self) -> bool {
        self.navigate(Direction::Down)
    }

    pub fn navigate_left(&mut self) -> bool {
        self.navigate(Direction::Left)
    }

    pub fn navigate_right(&mut self) -> bool {
        self.navigate(Direction::Right)
    }

    // ========================================================================
    // Tab cursor
    // ========================================================================

    pub fn tab_index(&self) -> usize {
        self.tab_index
    }

    pub fn set_tab_index(&mut self, index: usize) {
        self.tab_index = index.min(self.tab_count.saturating_sub(1));
    }

    pub fn tab_count(&self) -> usize {
        self.tab_count
    }

    /// Record the number of open tabs; the tab area needs at least two
    pub fn set_tab_count(&mut self, count: usize) {
        self.tab_count = count;
        self.tab_index = self.tab_index.min(count.saturating_sub(1));
        self.set_enabled(Region::TabArea, count >= 2);
    }

    /// Advance the tab cursor with wrap-around
    pub fn next_tab(&mut self) -> usize {
        if self.tab_count > 0 {
            self.tab_index = (self.tab_index + 1) % self.tab_count;
        }
        self.tab_index
    }

    /// Step the tab cursor back with wrap-around
    pub fn previous_tab(&mut self) -> usize {
        if self.tab_count > 0 {
            self.tab_index = (self.tab_index + self.tab_count - 1) % self.tab_count;
        }
        self.tab_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_in_code_area() {
        let regions = RegionManager::new();
        assert_eq!(regions.current(), Region::CodeArea);
        assert_eq!(regions.region_name(), "Code Area");
    }

    #[test]
    fn test_up_needs_tab_area_enabled() {
        let mut regions = RegionManager::new();
        regions.set_tab_count(1);
        assert!(!regions.navigate_up());
        regions.set_tab_count(2);
        assert!(regions.navigate_up());
        assert_eq!(regions.current(), Region::TabArea);
        assert!(regions.navigate_down());
        assert_eq!(regions.current(), Region::CodeArea);
    }

    #[test]
    fn test_code_area_right_has_no_neighbour() {
        let mut regions = RegionManager::new();
        assert!(!regions.navigate_right());
        assert_eq!(regions.current(), Region::CodeArea);
    }

    #[test]
    fn test_file_browser_transitions() {
        let mut regions = RegionManager::new();
        regions.set_enabled(Region::FileBrowser, true);
        assert!(regions.navigate_left());
        assert_eq!(regions.current(), Region::FileBrowser);
        assert!(!regions.navigate_left());
        assert!(regions.navigate_right());
        assert_eq!(regions.current(), Region::CodeArea);
    }

    #[test]
    fn test_terminal_left_skips_hidden_browser() {
        let mut regions = RegionManager::new();
        regions.set_enabled(Region::Terminal, true);
        regions.set(Region::Terminal);
        assert!(regions.navigate_left());
        assert_eq!(regions.current(), Region::CodeArea);

        regions.set(Region::Terminal);
        regions.set_enabled(Region::FileBrowser, true);
        assert!(regions.navigate_left());
        assert_eq!(regions.current(), Region::FileBrowser);
    }

    #[test]
    fn test_code_area_down_needs_terminal() {
        let mut regions = RegionManager::new();
        assert!(!regions.navigate_down());
        regions.set_enabled(Region::Terminal, true);
        assert!(regions.navigate_down());
        assert_eq!(regions.current(), Region::Terminal);
    }

    #[test]
    fn test_tab_wrap() {
        let mut regions = RegionManager::new();
        regions.set_tab_count(3);
        regions.set_tab_index(2);
        assert_eq!(regions.next_tab(), 0);
        assert_eq!(regions.previous_tab(), 2);
        regions.set_tab_count(2);
        assert_eq!(regions.tab_index(), 1);
    }
}
