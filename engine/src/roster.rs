//! Fixed league roster: two conferences, two divisions each, eight teams per division.

use crate::{Conference, Team};

pub const DIVISION_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Division {
    pub name: &'static str,
    /// Prefix used in seed labels (`A1`, `M2`, ...).
    pub abbrev: char,
    pub teams: [&'static str; DIVISION_SIZE],
}

impl Division {
    pub fn contains(&self, team: &Team) -> bool {
        self.teams.iter().any(|name| *name == team.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConferenceRoster {
    pub conference: Conference,
    /// Division 1 and division 2, in bracket order.
    pub divisions: [Division; 2],
}

impl ConferenceRoster {
    pub fn contains(&self, team: &Team) -> bool {
        self.divisions.iter().any(|d| d.contains(team))
    }
}

pub const ATLANTIC: Division = Division {
    name: "Atlantic",
    abbrev: 'A',
    teams: [
        "Florida Panthers",
        "Toronto Maple Leafs",
        "Tampa Bay Lightning",
        "Boston Bruins",
        "Buffalo Sabres",
        "Ottawa Senators",
        "Detroit Red Wings",
        "Montreal Canadiens",
    ],
};

pub const METROPOLITAN: Division = Division {
    name: "Metropolitan",
    abbrev: 'M',
    teams: [
        "Carolina Hurricanes",
        "New York Rangers",
        "Washington Capitals",
        "New York Islanders",
        "Pittsburgh Penguins",
        "Philadelphia Flyers",
        "New Jersey Devils",
        "Columbus Blue Jackets",
    ],
};

pub const CENTRAL: Division = Division {
    name: "Central",
    abbrev: 'C',
    teams: [
        "Dallas Stars",
        "Colorado Avalanche",
        "Winnipeg Jets",
        "Nashville Predators",
        "Minnesota Wild",
        "St. Louis Blues",
        "Arizona Coyotes",
        "Chicago Blackhawks",
    ],
};

pub const PACIFIC: Division = Division {
    name: "Pacific",
    abbrev: 'P',
    teams: [
        "Vegas Golden Knights",
        "Edmonton Oilers",
        "Los Angeles Kings",
        "Vancouver Canucks",
        "Seattle Kraken",
        "Calgary Flames",
        "Anaheim Ducks",
        "San Jose Sharks",
    ],
};

pub static LEAGUE: [ConferenceRoster; 2] = [
    ConferenceRoster {
        conference: Conference::Eastern,
        divisions: [ATLANTIC, METROPOLITAN],
    },
    ConferenceRoster {
        conference: Conference::Western,
        divisions: [CENTRAL, PACIFIC],
    },
];

pub fn conference_roster(conference: Conference) -> &'static ConferenceRoster {
    &LEAGUE[conference.index()]
}
