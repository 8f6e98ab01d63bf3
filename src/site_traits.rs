// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the trait that needs to be implemented by the types
//! that represent a source or sink site, and the `Coordinate` type.

/// A geographic position in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/**
This trait needs to be implemented by the types that represent heat sources
and heat sinks, so that [`find_neighbours`][crate::find_neighbours] can read
their location and temperature.

Read more about why this is necessary [here][crate#the-site-trait].

<details>
<summary>Example implementation for a plain site record:</summary>

```
use heat_network_matching::{Coordinate, Site};

struct ExcessHeatSite {
    lon: f64,
    lat: f64,
    temperature: f64,
    capacity_mw: f64,
}

impl Site for ExcessHeatSite {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lon, self.lat)
    }

    fn temperature(&self) -> f64 {
        self.temperature
    }
}
```

</details>
*/
pub trait Site {
    /// Returns the location of the site.
    fn coordinate(&self) -> Coordinate;
    /// Returns the temperature of the site in °C.
    fn temperature(&self) -> f64;
}
