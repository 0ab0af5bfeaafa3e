use super::allocator::AddressMap;
use crate::plan::{NavigationValues, ReservedAddress, ResultNavigation};

/// Resolves a navigation target name to the address the runtime should jump to.
///
/// Targets registered at the End address are flow results; the target name then becomes the
/// preset result. Returns `None` if the name has not been registered.
pub fn resolve_navigation(target_name: &str, address_map: &AddressMap) -> Option<ResultNavigation> {
    address_map.get(target_name).map(|&next_address| {
        let preset_result = (next_address == ReservedAddress::End.address())
            .then(|| target_name.to_string());
        ResultNavigation::new(next_address, preset_result)
    })
}

/// Records `result -> navigation` unless the result is already mapped. First entry wins.
/// Returns `false` when the entry was dropped as a duplicate.
pub fn insert_navigation(
    navigation_values: &mut NavigationValues,
    result: &str,
    navigation: ResultNavigation,
) -> bool {
    if navigation_values.contains_key(result) {
        return false;
    }
    navigation_values.insert(result.to_string(), navigation);
    true
}
