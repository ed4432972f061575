use std::sync::Arc;

use crate::models::lecture::Lecture;
use crate::models::search_option::SearchOption;
use crate::services::paging::PagedView;

use super::{all_majors, filter_lectures};

/// Search state behind the lecture picker: the catalog, the current criteria
/// and a paged view of the matching lectures.
#[derive(Debug, Clone)]
pub struct LectureSearch {
    catalog: Vec<Arc<Lecture>>,
    majors: Vec<String>,
    options: SearchOption,
    results: PagedView<Arc<Lecture>>,
}

impl LectureSearch {
    pub fn new(catalog: Vec<Arc<Lecture>>, page_size: usize) -> Self {
        let majors = all_majors(&catalog);
        let options = SearchOption::default();
        let results = PagedView::with_items(page_size, filter_lectures(&catalog, &options));
        Self {
            catalog,
            majors,
            options,
            results,
        }
    }

    /// Apply new criteria. Equal criteria are a no-op; otherwise the results
    /// are recomputed and the view returns to its first page.
    pub fn set_options(&mut self, options: SearchOption) -> bool {
        if options == self.options {
            return false;
        }

        let filtered = filter_lectures(&self.catalog, &options);
        self.options = options;
        if !self.results.set_items(filtered) {
            // Same lectures under different criteria still start over.
            self.results.reset();
        }
        true
    }

    pub fn options(&self) -> &SearchOption {
        &self.options
    }

    /// Distinct majors in the catalog, for the major picker
    pub fn majors(&self) -> &[String] {
        &self.majors
    }

    pub fn results(&self) -> &PagedView<Arc<Lecture>> {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut PagedView<Arc<Lecture>> {
        &mut self.results
    }

    pub fn visible(&self) -> &[Arc<Lecture>] {
        self.results.visible()
    }

    pub fn total(&self) -> usize {
        self.results.total()
    }
}
