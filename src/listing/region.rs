//! Geography filter for listings (sent as `g`).

// self
use crate::{_prelude::*, error::ValidationError};

macro_rules! def_regions {
	($($variant:ident => $code:literal, $doc:literal;)+) => {
		/// Geography a listing can be restricted to.
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
		pub enum Region {
			$(
				#[doc = $doc]
				#[serde(rename = $code)]
				$variant,
			)+
		}
		impl Region {
			/// Every recognized region, in table order.
			pub const ALL: &'static [Region] = &[$(Region::$variant,)+];

			/// Wire code.
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Region::$variant => $code,)+
				}
			}
		}
	};
}

def_regions! {
	Global => "GLOBAL", "Worldwide.";
	UnitedStates => "US", "United States.";
	Argentina => "AR", "Argentina.";
	Australia => "AU", "Australia.";
	Bulgaria => "BG", "Bulgaria.";
	Canada => "CA", "Canada.";
	Chile => "CL", "Chile.";
	Colombia => "CO", "Colombia.";
	Croatia => "HR", "Croatia.";
	CzechRepublic => "CZ", "Czech Republic.";
	Finland => "FI", "Finland.";
	Greece => "GR", "Greece.";
	Hungary => "HU", "Hungary.";
	Iceland => "IS", "Iceland.";
	India => "IN", "India.";
	Ireland => "IE", "Ireland.";
	Japan => "JP", "Japan.";
	Malaysia => "MY", "Malaysia.";
	Mexico => "MX", "Mexico.";
	NewZealand => "NZ", "New Zealand.";
	Philippines => "PH", "Philippines.";
	Poland => "PL", "Poland.";
	Portugal => "PT", "Portugal.";
	PuertoRico => "PR", "Puerto Rico.";
	Romania => "RO", "Romania.";
	Serbia => "RS", "Serbia.";
	Singapore => "SG", "Singapore.";
	Sweden => "SE", "Sweden.";
	Taiwan => "TW", "Taiwan.";
	Thailand => "TH", "Thailand.";
	Turkey => "TR", "Turkey.";
	UnitedKingdom => "GB", "United Kingdom.";
	UsAlaska => "US_AK", "Alaska, United States.";
	UsAlabama => "US_AL", "Alabama, United States.";
	UsArkansas => "US_AR", "Arkansas, United States.";
	UsArizona => "US_AZ", "Arizona, United States.";
	UsCalifornia => "US_CA", "California, United States.";
	UsColorado => "US_CO", "Colorado, United States.";
	UsConnecticut => "US_CT", "Connecticut, United States.";
	UsDistrictOfColumbia => "US_DC", "District of Columbia, United States.";
	UsDelaware => "US_DE", "Delaware, United States.";
	UsFlorida => "US_FL", "Florida, United States.";
	UsGeorgia => "US_GA", "Georgia, United States.";
	UsHawaii => "US_HI", "Hawaii, United States.";
	UsIowa => "US_IA", "Iowa, United States.";
	UsIdaho => "US_ID", "Idaho, United States.";
	UsIllinois => "US_IL", "Illinois, United States.";
	UsIndiana => "US_IN", "Indiana, United States.";
	UsKansas => "US_KS", "Kansas, United States.";
	UsKentucky => "US_KY", "Kentucky, United States.";
	UsLouisiana => "US_LA", "Louisiana, United States.";
	UsMassachusetts => "US_MA", "Massachusetts, United States.";
	UsMaryland => "US_MD", "Maryland, United States.";
	UsMaine => "US_ME", "Maine, United States.";
	UsMichigan => "US_MI", "Michigan, United States.";
	UsMinnesota => "US_MN", "Minnesota, United States.";
	UsMissouri => "US_MO", "Missouri, United States.";
	UsMississippi => "US_MS", "Mississippi, United States.";
	UsMontana => "US_MT", "Montana, United States.";
	UsNorthCarolina => "US_NC", "North Carolina, United States.";
	UsNorthDakota => "US_ND", "North Dakota, United States.";
	UsNebraska => "US_NE", "Nebraska, United States.";
	UsNewHampshire => "US_NH", "New Hampshire, United States.";
	UsNewJersey => "US_NJ", "New Jersey, United States.";
	UsNewMexico => "US_NM", "New Mexico, United States.";
	UsNevada => "US_NV", "Nevada, United States.";
	UsNewYork => "US_NY", "New York, United States.";
	UsOhio => "US_OH", "Ohio, United States.";
	UsOklahoma => "US_OK", "Oklahoma, United States.";
	UsOregon => "US_OR", "Oregon, United States.";
	UsPennsylvania => "US_PA", "Pennsylvania, United States.";
	UsRhodeIsland => "US_RI", "Rhode Island, United States.";
	UsSouthCarolina => "US_SC", "South Carolina, United States.";
	UsSouthDakota => "US_SD", "South Dakota, United States.";
	UsTennessee => "US_TN", "Tennessee, United States.";
	UsTexas => "US_TX", "Texas, United States.";
	UsUtah => "US_UT", "Utah, United States.";
	UsVirginia => "US_VA", "Virginia, United States.";
	UsVermont => "US_VT", "Vermont, United States.";
	UsWashington => "US_WA", "Washington, United States.";
	UsWisconsin => "US_WI", "Wisconsin, United States.";
	UsWestVirginia => "US_WV", "West Virginia, United States.";
	UsWyoming => "US_WY", "Wyoming, United States.";
}

impl Display for Region {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Region {
	type Err = ValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let code = s.trim();

		Region::ALL
			.iter()
			.copied()
			.find(|region| region.as_str().eq_ignore_ascii_case(code))
			.ok_or_else(|| ValidationError::UnknownRegion { value: s.to_owned() })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn codes_parse_case_insensitively() {
		assert_eq!("us_ca".parse::<Region>(), Ok(Region::UsCalifornia));
		assert_eq!("GLOBAL".parse::<Region>(), Ok(Region::Global));
		assert_eq!("RS".parse::<Region>(), Ok(Region::Serbia));
		assert_eq!(
			"ZZ".parse::<Region>(),
			Err(ValidationError::UnknownRegion { value: "ZZ".into() })
		);
	}

	#[test]
	fn table_codes_are_unique() {
		for (index, region) in Region::ALL.iter().enumerate() {
			assert!(
				Region::ALL[index + 1..].iter().all(|other| other.as_str() != region.as_str()),
				"{region} appears twice."
			);
			assert_eq!(region.as_str().parse::<Region>(), Ok(*region));
		}

		assert_eq!(Region::ALL.len(), 83);
	}
}
