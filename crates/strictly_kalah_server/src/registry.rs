//! Live board registry.
//!
//! Every board sits in its own cell. A move holds that cell's lock for the
//! whole load, sow and publish sequence, so moves against one board are
//! applied strictly one after another while other boards proceed in
//! parallel. The index of cells has its own lock, held only to resolve or
//! insert a cell.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use strictly_kalah::{
    BoardConfig, BoardId, BoardSetup, BoardState, MoveError, MoveOutcome, PlayerName, Seat,
    SetupError, apply_move,
};
use tracing::{debug, info, instrument, warn};

/// Error returned by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RegistryError {
    /// No board is registered under this id.
    #[display("Board {_0} not found")]
    BoardNotFound(BoardId),

    /// The turn engine refused the move; the board is unchanged.
    #[display("{_0}")]
    Move(MoveError),

    /// The board could not be created.
    #[display("{_0}")]
    Setup(SetupError),
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::BoardNotFound(_) => None,
            RegistryError::Move(err) => Some(err),
            RegistryError::Setup(err) => Some(err),
        }
    }
}

impl From<MoveError> for RegistryError {
    fn from(err: MoveError) -> Self {
        RegistryError::Move(err)
    }
}

impl From<SetupError> for RegistryError {
    fn from(err: SetupError) -> Self {
        RegistryError::Setup(err)
    }
}

/// The single owner of one board's current state.
///
/// The state is replaced whole on every successful move, so a reader never
/// sees a board halfway through a sowing.
#[derive(Debug)]
struct BoardCell {
    current: Mutex<Arc<BoardState>>,
}

impl BoardCell {
    fn new(board: BoardState) -> Self {
        Self {
            current: Mutex::new(Arc::new(board)),
        }
    }

    /// Locks the cell. A poisoned lock still guards a complete state,
    /// because states are only ever swapped in whole.
    fn lock(&self) -> MutexGuard<'_, Arc<BoardState>> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> Arc<BoardState> {
        Arc::clone(&self.lock())
    }
}

#[derive(Debug, Default)]
struct Index {
    cells: HashMap<BoardId, Arc<BoardCell>>,
    order: Vec<BoardId>,
}

/// Owns every live board and serializes moves per board.
///
/// Cloning is cheap and shares the same boards, so one registry can be
/// handed to any number of request handlers.
#[derive(Debug, Clone, Default)]
pub struct BoardRegistry {
    index: Arc<RwLock<Index>>,
    config: BoardConfig,
}

impl BoardRegistry {
    /// Creates an empty registry whose boards use `config` by default.
    #[instrument]
    pub fn new(config: BoardConfig) -> Self {
        info!("Creating board registry");
        Self {
            index: Arc::default(),
            config,
        }
    }

    /// Default configuration for boards created with [`BoardRegistry::create`].
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Creates and registers a fresh board; `first` moves first.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Setup`] for blank or identical participants.
    pub fn create(
        &self,
        first: impl Into<PlayerName>,
        second: impl Into<PlayerName>,
    ) -> Result<BoardState, RegistryError> {
        self.create_with(first, second, self.config)
    }

    /// Creates and registers a fresh board with its own configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Setup`] for blank or identical participants
    /// or an out-of-range configuration.
    #[instrument(skip(self, first, second))]
    pub fn create_with(
        &self,
        first: impl Into<PlayerName>,
        second: impl Into<PlayerName>,
        config: BoardConfig,
    ) -> Result<BoardState, RegistryError> {
        let board = BoardSetup::new(first, second)
            .config(config)
            .start()
            .inspect_err(|e| warn!(error = %e, "Board creation rejected"))?;
        self.insert(board.clone());

        info!(
            board_id = %board.id(),
            first = %board.player(Seat::First),
            second = %board.player(Seat::Second),
            "Created board"
        );
        Ok(board)
    }

    /// Registers an existing board, for example one restored from a
    /// snapshot. A board with the same id is replaced in place.
    #[instrument(skip(self, board), fields(board_id = %board.id()))]
    pub fn insert(&self, board: BoardState) {
        let id = board.id().clone();
        let mut index = self.write_index();
        if let Some(cell) = index.cells.get(&id) {
            debug!("Replacing registered board");
            *cell.lock() = Arc::new(board);
            return;
        }
        index.cells.insert(id.clone(), Arc::new(BoardCell::new(board)));
        index.order.push(id);
    }

    /// Current state of a board.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::BoardNotFound`] for an unknown id.
    #[instrument(skip(self))]
    pub fn get(&self, id: &BoardId) -> Result<BoardState, RegistryError> {
        let cell = self.cell(id)?;
        Ok(BoardState::clone(&cell.load()))
    }

    /// Every board, in creation order.
    #[instrument(skip(self))]
    pub fn list(&self) -> Vec<BoardState> {
        let boards: Vec<_> = self
            .cells_in_order()
            .iter()
            .map(|cell| BoardState::clone(&cell.load()))
            .collect();
        debug!(count = boards.len(), "Listed boards");
        boards
    }

    /// Boards `player` takes part in, in creation order.
    #[instrument(skip(self))]
    pub fn list_for(&self, player: &PlayerName) -> Vec<BoardState> {
        self.cells_in_order()
            .iter()
            .map(|cell| cell.load())
            .filter(|board| board.is_participant(player))
            .map(|board| BoardState::clone(&board))
            .collect()
    }

    /// Applies a move to a registered board.
    ///
    /// The board's lock is held from loading the current state until the
    /// successor is published. A rejected move publishes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::BoardNotFound`] for an unknown id, checked
    /// before the board is locked, or [`RegistryError::Move`] when the
    /// engine refuses the move.
    #[instrument(skip(self))]
    pub fn apply_move(
        &self,
        id: &BoardId,
        player: &PlayerName,
        pit: usize,
    ) -> Result<(BoardState, MoveOutcome), RegistryError> {
        let cell = self.cell(id)?;
        let mut current = cell.lock();

        let (next, outcome) = apply_move(&current, player, pit).inspect_err(|e| {
            warn!(error = %e, turn = current.turn_num(), "Move rejected");
        })?;
        *current = Arc::new(next.clone());
        drop(current);

        debug!(turn = next.turn_num(), %outcome, "Move published");
        Ok((next, outcome))
    }

    /// Number of registered boards.
    pub fn len(&self) -> usize {
        self.read_index().order.len()
    }

    /// Returns true if no board is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, id: &BoardId) -> Result<Arc<BoardCell>, RegistryError> {
        self.read_index().cells.get(id).cloned().ok_or_else(|| {
            debug!(board_id = %id, "Board not found");
            RegistryError::BoardNotFound(id.clone())
        })
    }

    /// Cells in creation order, resolved under a single read of the index.
    fn cells_in_order(&self) -> Vec<Arc<BoardCell>> {
        let index = self.read_index();
        index
            .order
            .iter()
            .filter_map(|id| index.cells.get(id).cloned())
            .collect()
    }

    fn read_index(&self) -> std::sync::RwLockReadGuard<'_, Index> {
        self.index
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_index(&self) -> std::sync::RwLockWriteGuard<'_, Index> {
        self.index
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
