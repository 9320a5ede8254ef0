// src/domain/status.rs

/// Listing status as recorded by the scraper. The set is closed: an update
/// row whose status label is not one of these is dropped at the join stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    ForSale,
    Sold,
    Pending,
    Withdrawn,
    Cancelled,
    Expired,
}

/// What a status means for active inventory: a `For Sale` event is a
/// property entering the market, terminal statuses are exits, and
/// `Pending` counts as neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Enter,
    Exit,
    Ignored,
}

impl Status {
    pub fn parse(label: &str) -> Option<Status> {
        match label {
            "For Sale" => Some(Status::ForSale),
            "Sold" => Some(Status::Sold),
            "Pending" => Some(Status::Pending),
            "Withdrawn" => Some(Status::Withdrawn),
            "Cancelled" => Some(Status::Cancelled),
            "Expired" => Some(Status::Expired),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::ForSale => "For Sale",
            Status::Sold => "Sold",
            Status::Pending => "Pending",
            Status::Withdrawn => "Withdrawn",
            Status::Cancelled => "Cancelled",
            Status::Expired => "Expired",
        }
    }

    /// Total mapping; adding a status without classifying it here is a
    /// compile error rather than a silent null.
    pub fn direction(self) -> Direction {
        match self {
            Status::ForSale => Direction::Enter,
            Status::Sold | Status::Expired | Status::Withdrawn | Status::Cancelled => {
                Direction::Exit
            }
            Status::Pending => Direction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses_classify_as_exit() {
        for s in [Status::Sold, Status::Expired, Status::Withdrawn, Status::Cancelled] {
            assert_eq!(s.direction(), Direction::Exit, "{s:?}");
        }
    }

    #[test]
    fn for_sale_enters_and_pending_is_ignored() {
        assert_eq!(Status::ForSale.direction(), Direction::Enter);
        assert_eq!(Status::Pending.direction(), Direction::Ignored);
    }

    #[test]
    fn unknown_label_does_not_parse() {
        assert_eq!(Status::parse("Sold"), Some(Status::Sold));
        assert_eq!(Status::parse("Leased"), None);
    }
}
