use serde::{Deserialize, Serialize};

/// The six suspects, in the order they are handed out to joining players.
pub const SUSPECTS: [&str; 6] = [
    "Miss Scarlet",
    "Colonel Mustard",
    "Mrs. White",
    "Mr. Green",
    "Mrs. Peacock",
    "Professor Plum",
];

pub const WEAPONS: [&str; 6] = ["Candlestick", "Knife", "Lead Pipe", "Revolver", "Rope", "Wrench"];

/// The nine rooms, laid out row by row on a 3x3 grid.
pub const ROOMS: [&str; 9] = [
    "Study",
    "Hall",
    "Lounge",
    "Library",
    "Billiard Room",
    "Dining Room",
    "Conservatory",
    "Ballroom",
    "Kitchen",
];

/// Each hallway connects exactly two rooms.
const HALLWAYS: [(&str, &str); 12] = [
    ("Study", "Hall"),
    ("Hall", "Lounge"),
    ("Study", "Library"),
    ("Hall", "Billiard Room"),
    ("Lounge", "Dining Room"),
    ("Library", "Billiard Room"),
    ("Billiard Room", "Dining Room"),
    ("Library", "Conservatory"),
    ("Billiard Room", "Ballroom"),
    ("Dining Room", "Kitchen"),
    ("Conservatory", "Ballroom"),
    ("Ballroom", "Kitchen"),
];

/// Corner rooms joined by a secret passage.
const SECRET_PASSAGES: [(&str, &str); 2] = [("Study", "Kitchen"), ("Lounge", "Conservatory")];

/// The hallway (index into `HALLWAYS`) each suspect enters from their start space.
const START_HALLWAYS: [(&str, usize); 6] = [
    ("Miss Scarlet", 1),
    ("Colonel Mustard", 4),
    ("Mrs. White", 11),
    ("Mr. Green", 10),
    ("Mrs. Peacock", 7),
    ("Professor Plum", 2),
];

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum LocationKind {
    Room,
    Hallway,
    StartSpace,
}

/// A space on the board that tokens can occupy.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Location {
    pub id: usize,
    pub name: String,
    pub kind: LocationKind,
}

/// The static layout of the mansion. Built once per game and never mutated.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Board {
    locations: Vec<Location>,
    neighbours: Vec<Vec<usize>>,
    /// Start space of each suspect, indexed like `SUSPECTS`.
    start_spaces: Vec<usize>,
}

impl Board {
    /// Creates the standard board.
    pub fn new() -> Self {
        let mut board = Board {
            locations: vec![],
            neighbours: vec![],
            start_spaces: vec![],
        };

        for room in ROOMS {
            board.add_location(room.to_string(), LocationKind::Room);
        }

        let mut hallways = Vec::with_capacity(HALLWAYS.len());
        for (a, b) in HALLWAYS {
            let hallway = board.add_location(hallway_name(a, b), LocationKind::Hallway);
            for room in [a, b] {
                if let Some(room) = board.room(room) {
                    board.connect(hallway, room);
                }
            }
            hallways.push(hallway);
        }

        for (a, b) in SECRET_PASSAGES {
            if let (Some(a), Some(b)) = (board.room(a), board.room(b)) {
                board.connect(a, b);
            }
        }

        for suspect in SUSPECTS {
            let hallway = START_HALLWAYS
                .iter()
                .find(|(name, _)| *name == suspect)
                .map(|(_, idx)| hallways[*idx]);
            let start = board.add_location(format!("{} Start", suspect), LocationKind::StartSpace);
            // Start spaces are one-way: nobody moves back onto them.
            if let Some(hallway) = hallway {
                board.neighbours[start].push(hallway);
            }
            board.start_spaces.push(start);
        }

        board
    }

    /// Finds the location with the given name.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.locations.iter().position(|l| l.name == name)
    }

    /// Gets a location by ID.
    pub fn location(&self, id: usize) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Gets the name of a location, or an empty string for an unknown ID.
    pub fn name(&self, id: usize) -> &str {
        self.locations.get(id).map(|l| &l.name[..]).unwrap_or("")
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// The locations reachable in a single move from the given location.
    pub fn neighbours(&self, id: usize) -> &[usize] {
        self.neighbours.get(id).map(|n| &n[..]).unwrap_or(&[])
    }

    /// Gets the start space of the named suspect.
    pub fn start_space(&self, suspect: &str) -> Option<usize> {
        let idx = SUSPECTS.iter().position(|s| *s == suspect)?;
        self.start_spaces.get(idx).copied()
    }

    /// Gets the IDs of all the rooms.
    pub fn rooms(&self) -> impl Iterator<Item = usize> + '_ {
        self.locations
            .iter()
            .filter(|l| l.kind == LocationKind::Room)
            .map(|l| l.id)
    }

    fn add_location(&mut self, name: String, kind: LocationKind) -> usize {
        let id = self.locations.len();
        self.locations.push(Location { id, name, kind });
        self.neighbours.push(vec![]);
        id
    }

    fn connect(&mut self, a: usize, b: usize) {
        self.neighbours[a].push(b);
        self.neighbours[b].push(a);
    }

    /// Rooms are added first, so a room's ID is its index in `ROOMS`.
    fn room(&self, name: &str) -> Option<usize> {
        let id = ROOMS.iter().position(|r| *r == name);
        debug_assert!(id.is_some(), "unknown room {}", name);
        id
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn hallway_name(a: &str, b: &str) -> String {
    format!("{} - {} Hallway", a, b)
}
