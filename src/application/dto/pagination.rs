use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    Number(u64),
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid page.")]
pub struct InvalidPage;

impl FromStr for PageNumber {
    type Err = InvalidPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "last" {
            return Ok(PageNumber::Last);
        }
        match s.parse::<u64>() {
            Ok(n) if n >= 1 => Ok(PageNumber::Number(n)),
            _ => Err(InvalidPage),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: PageNumber,
    pub page_size: u32,
}

/// Concrete window into a result set of `total` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub num_pages: u64,
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    /// Resolves the requested page against the row count. An empty result
    /// set still has a first page.
    pub fn window(&self, total: i64) -> Result<PageWindow, InvalidPage> {
        let size = u64::from(self.page_size.max(1));
        let total = total.max(0) as u64;
        let num_pages = total.div_ceil(size).max(1);
        let number = match self.page {
            PageNumber::Last => num_pages,
            PageNumber::Number(n) if n <= num_pages => n,
            PageNumber::Number(_) => return Err(InvalidPage),
        };
        Ok(PageWindow {
            number,
            num_pages,
            limit: size as i64,
            offset: ((number - 1) * size) as i64,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub number: u64,
    pub num_pages: u64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: PageNumber) -> PageRequest {
        PageRequest { page, page_size: 10 }
    }

    #[test]
    fn parses_page_numbers() {
        assert_eq!("3".parse::<PageNumber>(), Ok(PageNumber::Number(3)));
        assert_eq!("last".parse::<PageNumber>(), Ok(PageNumber::Last));
        assert_eq!("0".parse::<PageNumber>(), Err(InvalidPage));
        assert_eq!("-1".parse::<PageNumber>(), Err(InvalidPage));
        assert_eq!("two".parse::<PageNumber>(), Err(InvalidPage));
    }

    #[test]
    fn computes_offsets() {
        let w = request(PageNumber::Number(2)).window(25).unwrap();
        assert_eq!((w.number, w.num_pages, w.limit, w.offset), (2, 3, 10, 10));

        let w = request(PageNumber::Last).window(25).unwrap();
        assert_eq!((w.number, w.offset), (3, 20));
    }

    #[test]
    fn empty_results_have_one_page() {
        let w = request(PageNumber::Number(1)).window(0).unwrap();
        assert_eq!((w.number, w.num_pages, w.offset), (1, 1, 0));
        assert_eq!(request(PageNumber::Number(2)).window(0), Err(InvalidPage));
    }

    #[test]
    fn rejects_pages_past_the_end() {
        assert_eq!(request(PageNumber::Number(4)).window(30), Err(InvalidPage));
        assert!(request(PageNumber::Number(3)).window(30).is_ok());
    }
}
