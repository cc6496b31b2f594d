use soroban_sdk::{Address, Env, Symbol};

use crate::{errors::RegistryError, ADMIN_CHANGED, ADMIN_KEY};

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&Symbol::new(env, ADMIN_KEY))
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage()
        .instance()
        .set(&Symbol::new(env, ADMIN_KEY), admin);
}

pub fn get_admin(env: &Env) -> Result<Address, RegistryError> {
    env.storage()
        .instance()
        .get(&Symbol::new(env, ADMIN_KEY))
        .ok_or(RegistryError::NotInitialized)
}

pub fn verify_admin(env: &Env, caller: &Address) -> Result<(), RegistryError> {
    let admin = get_admin(env)?;
    if &admin != caller {
        return Err(RegistryError::Unauthorized);
    }
    Ok(())
}

pub fn transfer_admin(
    env: &Env,
    current_admin: &Address,
    new_admin: &Address,
) -> Result<(), RegistryError> {
    current_admin.require_auth();
    verify_admin(env, current_admin)?;
    set_admin(env, new_admin);

    env.events()
        .publish((ADMIN_CHANGED,), (current_admin.clone(), new_admin.clone()));
    Ok(())
}
