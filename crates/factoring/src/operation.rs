use std::fmt;

/// Function name the host uses to initialize the store
pub const INIT_FUNCTION: &str = "init";

/// Operations exposed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Persist a record and index it by business number
    SaveData,
    /// Read back the liveness sentinel
    KeepaliveQuery,
    /// Read a record by the transaction id that created it
    QueryDataByFabricTxId,
    /// Read the newest record indexed under a business number
    QueryDataByBusinessNo,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::SaveData,
        Operation::KeepaliveQuery,
        Operation::QueryDataByFabricTxId,
        Operation::QueryDataByBusinessNo,
    ];

    /// Wire name the host routes by
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::SaveData => "SaveData",
            Operation::KeepaliveQuery => "KeepaliveQuery",
            Operation::QueryDataByFabricTxId => "QueryDataByFabricTxId",
            Operation::QueryDataByBusinessNo => "QueryDataByBusinessNo",
        }
    }

    /// Whether the operation needs a non-empty first argument
    pub fn requires_argument(&self) -> bool {
        !matches!(self, Operation::KeepaliveQuery)
    }

    /// Whether the operation never writes state
    pub fn is_read_only(&self) -> bool {
        !matches!(self, Operation::SaveData)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_save_data_writes() {
        let writers: Vec<_> = Operation::ALL
            .iter()
            .filter(|op| !op.is_read_only())
            .collect();
        assert_eq!(writers, vec![&Operation::SaveData]);
    }

    #[test]
    fn test_wire_names_are_distinct() {
        let mut names: Vec<_> = Operation::ALL.iter().map(|op| op.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Operation::ALL.len());
    }
}
